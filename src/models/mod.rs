//! Entities and parameter objects of the Dataleon API.
//!
//! Every type here is declared through the `model!` table, so its wire
//! names, optionality and value kinds live next to its fields.

mod common;
mod companies;
mod documents;
mod individuals;

pub use common::{AmlSuspicion, Certificat, Check, IdentityCard, Property, Risk, Tag, TechnicalData};
pub use companies::{
	CompanyCreateParams, CompanyInformation, CompanyListParams, CompanyRegistration,
	CompanyRetrieveParams, CompanyUpdateParams, Member,
};
pub use documents::{
	Document, DocumentTable, DocumentUploadParams, DocumentValue, ListDocumentsResponse,
};
pub use individuals::{
	Individual, IndividualCreateParams, IndividualListParams, IndividualRetrieveParams,
	IndividualUpdateParams, Person,
};
