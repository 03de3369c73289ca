use chrono::{DateTime, Utc};

use crate::{
	enums::{AmlSuspicionCategory, AmlSuspicionStatus},
	schema::ValueKind,
};

model! {
	/// Signed verification certificate issued once a file is processed.
	pub struct Certificat {
		/// Certificate identifier.
		optional id: String => ValueKind::String,
		/// Issue time.
		optional created_at: DateTime<Utc> => ValueKind::DateTime,
		/// Name of the PDF file.
		optional filename: String => ValueKind::String,
	}
}

model! {
	/// Outcome of one automated control.
	pub struct Check {
		/// Whether details are hidden from the end user.
		optional masked: bool => ValueKind::Bool,
		/// Human-readable explanation.
		optional message: String => ValueKind::String,
		/// Control name.
		optional name: String => ValueKind::String,
		/// Whether the control passed.
		optional validate: bool => ValueKind::Bool,
		/// Weight of the control in the overall risk.
		optional weight: i64 => ValueKind::Int,
	}
}

model! {
	/// Aggregate risk assessment.
	pub struct Risk {
		/// Risk code.
		optional code: String => ValueKind::String,
		/// Explanation of the score.
		optional reason: String => ValueKind::String,
		/// Score between 0 and 1.
		optional score: f64 => ValueKind::Float,
	}
}

model! {
	/// Free-form property extracted or attached to a file.
	pub struct Property {
		/// Property name.
		optional name: String => ValueKind::String,
		/// Declared type of `value`.
		optional kind: String = "type" => ValueKind::String,
		/// The value, of whatever shape the API returns.
		optional value: serde_json::Value => ValueKind::Mixed,
	}
}

model! {
	/// Label attached to a file.
	pub struct Tag {
		/// Tag key.
		optional key: String => ValueKind::String,
		/// Whether the tag is hidden from the end user.
		optional private: bool => ValueKind::Bool,
		/// Declared type of `value`.
		optional kind: String = "type" => ValueKind::String,
		/// Tag value.
		optional value: String => ValueKind::String,
	}
}

model! {
	/// A potential anti-money-laundering match.
	pub struct AmlSuspicion {
		/// Name of the matched entity.
		optional caption: String => ValueKind::String,
		/// Country of the matched entity.
		optional country: String => ValueKind::String,
		/// Gender of the matched entity.
		optional gender: String => ValueKind::String,
		/// Relation between the subject and the match.
		optional relation: String => ValueKind::String,
		/// Schema of the source record.
		optional schema: String => ValueKind::String,
		/// Match confidence.
		optional score: f64 => ValueKind::Float,
		/// Source list.
		optional source: String => ValueKind::String,
		/// Review outcome.
		optional status: AmlSuspicionStatus => ValueKind::Enum,
		/// Hit category.
		optional category: AmlSuspicionCategory = "type" => ValueKind::Enum,
	}
}

model! {
	/// Session settings and processing timestamps.
	///
	/// The timestamps are `null` until the matching event happens, which is
	/// different from the API not reporting them at all.
	pub struct TechnicalData {
		/// Enable anti-money-laundering screening.
		optional active_aml_suspicions: bool => ValueKind::Bool,
		/// API version used to process the file.
		optional api_version: i64 => ValueKind::Int,
		/// Approval time.
		nullable approved_at: DateTime<Utc> => ValueKind::DateTime,
		/// URL called with the result.
		optional callback_url: String => ValueKind::String,
		/// URL called on status changes.
		optional callback_url_notification: String => ValueKind::String,
		/// Suppress notification emails.
		optional disable_notification: bool => ValueKind::Bool,
		/// When notifications were disabled.
		nullable disable_notification_date: DateTime<Utc> => ValueKind::DateTime,
		/// Export format of the result.
		optional export_type: String => ValueKind::String,
		/// Minimum score for an AML hit to be reported.
		optional filtering_score_aml_suspicions: f64 => ValueKind::Float,
		/// Processing end time.
		nullable finished_at: DateTime<Utc> => ValueKind::DateTime,
		/// IP address of the subject.
		optional ip: String => ValueKind::String,
		/// Session language, ISO 639-2.
		optional language: String => ValueKind::String,
		/// Location derived from the IP address.
		optional location_ip: String => ValueKind::String,
		/// When manual review was requested.
		nullable need_review_at: DateTime<Utc> => ValueKind::DateTime,
		/// Whether the subject confirmed notifications.
		optional notification_confirmation: bool => ValueKind::Bool,
		/// Steps shown in the portal.
		optional portal_steps: Vec<String> => ValueKind::list(ValueKind::String),
		/// Include raw extraction output in results.
		optional raw_data: bool => ValueKind::Bool,
		/// Rejection time.
		nullable rejected_at: DateTime<Utc> => ValueKind::DateTime,
		/// Session lifetime in minutes.
		optional session_duration: i64 => ValueKind::Int,
		/// Session start time.
		nullable started_at: DateTime<Utc> => ValueKind::DateTime,
		/// Transfer time.
		nullable transfer_at: DateTime<Utc> => ValueKind::DateTime,
		/// Transfer mode.
		optional transfer_mode: String => ValueKind::String,
	}
}

model! {
	/// Data read from an identity card.
	pub struct IdentityCard {
		/// Document identifier.
		optional id: String => ValueKind::String,
		/// Signed URL of the back side image.
		optional back_document_signed_url: String => ValueKind::String,
		/// Place of birth.
		optional birth_place: String => ValueKind::String,
		/// Date of birth as printed.
		optional birthday: String => ValueKind::String,
		/// Issuing country.
		optional country: String => ValueKind::String,
		/// Expiry date as printed.
		optional expiration_date: String => ValueKind::String,
		/// First name.
		optional first_name: String => ValueKind::String,
		/// Signed URL of the front side image.
		optional front_document_signed_url: String => ValueKind::String,
		/// Gender.
		optional gender: String => ValueKind::String,
		/// Issue date as printed.
		optional issue_date: String => ValueKind::String,
		/// Last name.
		optional last_name: String => ValueKind::String,
		/// First machine-readable zone line.
		optional mrz_line_1: String => ValueKind::String,
		/// Second machine-readable zone line.
		optional mrz_line_2: String => ValueKind::String,
		/// Third machine-readable zone line.
		optional mrz_line_3: String => ValueKind::String,
		/// Document type.
		optional kind: String = "type" => ValueKind::String,
	}
}
