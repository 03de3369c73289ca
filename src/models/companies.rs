use chrono::{DateTime, Utc};

use super::{AmlSuspicion, Certificat, Check, Document, Property, Risk, TechnicalData};
use crate::{
	enums::{MemberSource, MemberType, VerificationState, VerificationStatus},
	schema::ValueKind,
};

model! {
	/// Registry information about a legal entity.
	pub struct CompanyInformation {
		/// Legal name.
		required name: String => ValueKind::String,
		/// Registered address.
		optional address: String => ValueKind::String,
		/// Closure date, when the company was struck off.
		optional closure_date: String => ValueKind::String,
		/// Trading name.
		optional commercial_name: String => ValueKind::String,
		/// Country of registration, ISO 3166-1 alpha-2.
		optional country: String => ValueKind::String,
		/// Contact email.
		optional email: String => ValueKind::String,
		/// Employer identification number.
		optional employer_identification_number: String => ValueKind::String,
		/// Number of employees.
		optional headcount: i64 => ValueKind::Int,
		/// Whether insolvency proceedings ever existed.
		optional insolvency_exists: bool => ValueKind::Bool,
		/// Whether insolvency proceedings are ongoing.
		optional insolvency_ongoing: bool => ValueKind::Bool,
		/// Legal form.
		optional legal_form: String => ValueKind::String,
		/// Activity code.
		optional naf_code: String => ValueKind::String,
		/// Contact phone number.
		optional phone_number: String => ValueKind::String,
		/// Registration date.
		optional registration_date: String => ValueKind::String,
		/// Registration number.
		optional registration_id: String => ValueKind::String,
		/// Share capital.
		optional share_capital: String => ValueKind::String,
		/// Registry status.
		optional status: String => ValueKind::String,
		/// Tax identification number.
		optional tax_identification_number: String => ValueKind::String,
		/// Company type.
		optional kind: String = "type" => ValueKind::String,
		/// Website.
		optional website_url: String => ValueKind::String,
	}
}

model! {
	/// A director, shareholder or beneficial owner of a company.
	pub struct Member {
		/// Member identifier.
		optional id: String => ValueKind::String,
		/// Postal address.
		optional address: String => ValueKind::String,
		/// Date of birth.
		optional birthday: String => ValueKind::String,
		/// Place of birth.
		optional birthplace: String => ValueKind::String,
		/// Country.
		optional country: String => ValueKind::String,
		/// Documents submitted for the member.
		optional documents: Vec<Document> => ValueKind::list(ValueKind::model::<Document>()),
		/// Email address.
		optional email: String => ValueKind::String,
		/// First name.
		optional first_name: String => ValueKind::String,
		/// Whether the member is a beneficial owner.
		optional is_beneficial_owner: bool => ValueKind::Bool,
		/// Whether the member holds a delegation of authority.
		optional is_delegator: bool => ValueKind::Bool,
		/// Last name.
		optional last_name: String => ValueKind::String,
		/// Whether a liveness check was performed.
		optional liveness_verification: bool => ValueKind::Bool,
		/// Name of a legal-person member.
		optional name: String => ValueKind::String,
		/// Ownership share, in percent.
		optional ownership_percentage: f64 => ValueKind::Float,
		/// Phone number.
		optional phone_number: String => ValueKind::String,
		/// Postal code.
		optional postal_code: String => ValueKind::String,
		/// Registration number of a legal-person member.
		optional registration_id: String => ValueKind::String,
		/// Relation to the company.
		optional relation: String => ValueKind::String,
		/// Roles held.
		optional roles: String => ValueKind::String,
		/// Where the data came from.
		optional source: MemberSource => ValueKind::Enum,
		/// Processing state.
		optional state: VerificationState => ValueKind::Enum,
		/// Review status.
		optional status: VerificationStatus => ValueKind::Enum,
		/// Natural or legal person.
		optional kind: MemberType = "type" => ValueKind::Enum,
		/// Workspace of the member's own file.
		optional workspace_id: String => ValueKind::String,
	}
}

model! {
	/// A KYB file for one company.
	pub struct CompanyRegistration {
		/// Unique identifier.
		optional id: String => ValueKind::String,
		/// Anti-money-laundering hits.
		optional aml_suspicions: Vec<AmlSuspicion> =>
			ValueKind::list(ValueKind::model::<AmlSuspicion>()),
		/// Verification certificate.
		optional certificat: Certificat => ValueKind::model::<Certificat>(),
		/// Automated controls.
		optional checks: Vec<Check> => ValueKind::list(ValueKind::model::<Check>()),
		/// Registry information.
		optional company: CompanyInformation => ValueKind::model::<CompanyInformation>(),
		/// Creation time.
		optional created_at: DateTime<Utc> => ValueKind::DateTime,
		/// Documents attached to the file.
		optional documents: Vec<Document> => ValueKind::list(ValueKind::model::<Document>()),
		/// Directors, shareholders and beneficial owners.
		optional members: Vec<Member> => ValueKind::list(ValueKind::model::<Member>()),
		/// Sequential number within the workspace.
		optional number: i64 => ValueKind::Int,
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
		/// Session settings and timestamps.
		optional technical_data: TechnicalData => ValueKind::model::<TechnicalData>(),
		/// Link to the verification web view.
		optional webview_url: String => ValueKind::String,
	}
}

model! {
	/// Body of `POST /companies`.
	pub struct CompanyCreateParams {
		/// Registry information; `name` is mandatory.
		required company: CompanyInformation => ValueKind::model::<CompanyInformation>(),
		/// Workspace the company belongs to.
		required workspace_id: String => ValueKind::String,
		/// Caller-supplied identifier.
		optional source_id: String => ValueKind::String,
		/// Session settings.
		optional technical_data: TechnicalData => ValueKind::model::<TechnicalData>(),
	}
}

model! {
	/// Body of `PUT /companies/{id}`.
	pub struct CompanyUpdateParams {
		/// Registry information.
		required company: CompanyInformation => ValueKind::model::<CompanyInformation>(),
		/// Workspace the company belongs to.
		required workspace_id: String => ValueKind::String,
		/// Caller-supplied identifier.
		optional source_id: String => ValueKind::String,
		/// Session settings.
		optional technical_data: TechnicalData => ValueKind::model::<TechnicalData>(),
	}
}

model! {
	/// Query of `GET /companies`.
	pub struct CompanyListParams {
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
	/// Query of `GET /companies/{id}`.
	pub struct CompanyRetrieveParams {
		/// Include documents in the response.
		optional document: bool => ValueKind::Bool,
		/// Restrict the response to one part of the file.
		optional scope: String => ValueKind::String,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mapper::{decode, decode_list, encode};
	use pretty_assertions::assert_eq;
	use serde_json::json;

	#[test]
	fn company_list_keeps_order_and_only_names() {
		let wire = json!([{"company": {"name": "ACME"}}, {"company": {"name": "Beta"}}]);
		let companies: Vec<CompanyRegistration> = decode_list(&wire).unwrap();

		let expected: Vec<_> = ["ACME", "Beta"]
			.into_iter()
			.map(|name| CompanyRegistration {
				company: Some(CompanyInformation {
					name: name.to_string(),
					..Default::default()
				}),
				..Default::default()
			})
			.collect();
		assert_eq!(companies, expected);
	}

	#[test]
	fn company_name_is_required() {
		let wire = json!({"company": {"country": "FR"}});
		let err = decode::<CompanyRegistration>(&wire).unwrap_err();

		assert_eq!(err.type_name(), "CompanyInformation");
		assert_eq!(err.field(), "company.name");
	}

	#[test]
	fn members_use_renamed_type_field() {
		let member = Member {
			first_name: Some("Ada".into()),
			kind: Some(MemberType::PERSON),
			ownership_percentage: Some(50.5),
			..Default::default()
		};

		let wire = encode(&member).unwrap();
		assert_eq!(
			wire,
			json!({"first_name": "Ada", "type": "person", "ownership_percentage": 50.5})
		);
		assert_eq!(decode::<Member>(&wire).unwrap(), member);
	}

	#[test]
	fn create_params_nest_company() {
		let params = CompanyCreateParams {
			company: CompanyInformation {
				name: "ACME".into(),
				registration_id: Some("552100554".into()),
				..Default::default()
			},
			workspace_id: "wk_1".into(),
			..Default::default()
		};

		assert_eq!(
			encode(&params).unwrap(),
			json!({
				"company": {"name": "ACME", "registration_id": "552100554"},
				"workspace_id": "wk_1"
			})
		);
	}
}
