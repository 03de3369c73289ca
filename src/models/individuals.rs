use chrono::{DateTime, Utc};

use super::{
	AmlSuspicion, Certificat, Check, Document, IdentityCard, Property, Risk, Tag, TechnicalData,
};
use crate::{
	enums::{Gender, VerificationState, VerificationStatus},
	schema::ValueKind,
};

model! {
	/// Personal details of an individual.
	pub struct Person {
		/// Date of birth, `DD/MM/YYYY`.
		optional birthday: String => ValueKind::String,
		/// Email address.
		optional email: String => ValueKind::String,
		/// Signed URL of the selfie.
		optional face_image_signed_url: String => ValueKind::String,
		/// First name.
		optional first_name: String => ValueKind::String,
		/// Full name as computed by the API.
		optional full_name: String => ValueKind::String,
		/// Gender.
		optional gender: Gender => ValueKind::Enum,
		/// Last name.
		optional last_name: String => ValueKind::String,
		/// Maiden name.
		optional maiden_name: String => ValueKind::String,
		/// Nationality, ISO 3166-1 alpha-3.
		optional nationality: String => ValueKind::String,
		/// Phone number with country code.
		optional phone_number: String => ValueKind::String,
	}
}

model! {
	/// A KYC file for one natural person.
	pub struct Individual {
		/// Unique identifier.
		required id: String => ValueKind::String,
		/// Anti-money-laundering hits.
		optional aml_suspicions: Vec<AmlSuspicion> =>
			ValueKind::list(ValueKind::model::<AmlSuspicion>()),
		/// Link for the subject to authenticate.
		optional auth_url: String => ValueKind::String,
		/// Verification certificate.
		optional certificat: Certificat => ValueKind::model::<Certificat>(),
		/// Automated controls.
		optional checks: Vec<Check> => ValueKind::list(ValueKind::model::<Check>()),
		/// Creation time.
		optional created_at: DateTime<Utc> => ValueKind::DateTime,
		/// Documents attached to the file.
		optional documents: Vec<Document> => ValueKind::list(ValueKind::model::<Document>()),
		/// Identity card data, when one was submitted.
		optional identity_card: IdentityCard => ValueKind::model::<IdentityCard>(),
		/// Sequential number within the workspace.
		optional number: i64 => ValueKind::Int,
		/// Personal details.
		optional person: Person => ValueKind::model::<Person>(),
		/// Link to the file in the Dataleon portal.
		optional portal_url: String => ValueKind::String,
		/// Custom properties.
		optional properties: Vec<Property> => ValueKind::list(ValueKind::model::<Property>()),
		/// Risk assessment.
		optional risk: Risk => ValueKind::model::<Risk>(),
		/// Caller-supplied identifier.
		optional source_id: String => ValueKind::String,
		/// Processing state.
		optional state: VerificationState => ValueKind::Enum,
		/// Review status.
		optional status: VerificationStatus => ValueKind::Enum,
		/// Labels.
		optional tags: Vec<Tag> => ValueKind::list(ValueKind::model::<Tag>()),
		/// Session settings and timestamps.
		optional technical_data: TechnicalData => ValueKind::model::<TechnicalData>(),
		/// Link to the verification web view.
		optional webview_url: String => ValueKind::String,
	}
}

model! {
	/// Body of `POST /individuals`.
	pub struct IndividualCreateParams {
		/// Workspace the individual belongs to.
		required workspace_id: String => ValueKind::String,
		/// Personal details.
		optional person: Person => ValueKind::model::<Person>(),
		/// Caller-supplied identifier.
		optional source_id: String => ValueKind::String,
		/// Session settings.
		optional technical_data: TechnicalData => ValueKind::model::<TechnicalData>(),
	}
}

model! {
	/// Body of `PUT /individuals/{id}`.
	pub struct IndividualUpdateParams {
		/// Workspace the individual belongs to.
		required workspace_id: String => ValueKind::String,
		/// Personal details.
		optional person: Person => ValueKind::model::<Person>(),
		/// Caller-supplied identifier.
		optional source_id: String => ValueKind::String,
		/// Session settings.
		optional technical_data: TechnicalData => ValueKind::model::<TechnicalData>(),
	}
}

model! {
	/// Query of `GET /individuals`.
	pub struct IndividualListParams {
		/// Only files created on or before this date, `YYYY-MM-DD`.
		optional end_date: String => ValueKind::String,
		/// Page size.
		optional limit: i64 => ValueKind::Int,
		/// Number of files to skip.
		optional offset: i64 => ValueKind::Int,
		/// Only files with this caller-supplied identifier.
		optional source_id: String => ValueKind::String,
		/// Only files created on or after this date, `YYYY-MM-DD`.
		optional start_date: String => ValueKind::String,
		/// Only files in this state.
		optional state: VerificationState => ValueKind::Enum,
		/// Only files with this status.
		optional status: VerificationStatus => ValueKind::Enum,
		/// Only files in this workspace.
		optional workspace_id: String => ValueKind::String,
	}
}

model! {
	/// Query of `GET /individuals/{id}`.
	pub struct IndividualRetrieveParams {
		/// Include documents in the response.
		optional document: bool => ValueKind::Bool,
		/// Restrict the response to one part of the file.
		optional scope: String => ValueKind::String,
	}
}
