use chrono::{DateTime, Utc};

use super::Check;
use crate::{
	enums::{DocumentType, VerificationState, VerificationStatus},
	schema::ValueKind,
};

model! {
	/// A table extracted from a document.
	pub struct DocumentTable {
		/// Rows of the table, as returned by the extractor.
		optional operation: Vec<serde_json::Value> => ValueKind::list(ValueKind::Mixed),
	}
}

model! {
	/// A value extracted from a document.
	pub struct DocumentValue {
		/// Extraction confidence.
		optional confidence: f64 => ValueKind::Float,
		/// Field name.
		optional name: String => ValueKind::String,
		/// Extracted value.
		optional value: serde_json::Value => ValueKind::Mixed,
	}
}

model! {
	/// An analysed document.
	pub struct Document {
		/// Document identifier.
		optional id: String => ValueKind::String,
		/// Controls run on the document.
		optional checks: Vec<Check> => ValueKind::list(ValueKind::model::<Check>()),
		/// Upload time.
		optional created_at: DateTime<Utc> => ValueKind::DateTime,
		/// Detected document type.
		optional document_type: DocumentType => ValueKind::Enum,
		/// File name.
		optional name: String => ValueKind::String,
		/// Signed download URL.
		optional signed_url: String => ValueKind::String,
		/// Processing state.
		optional state: VerificationState => ValueKind::Enum,
		/// Review status.
		optional status: VerificationStatus => ValueKind::Enum,
		/// Extracted tables.
		optional tables: Vec<DocumentTable> => ValueKind::list(ValueKind::model::<DocumentTable>()),
		/// Extracted values.
		optional values: Vec<DocumentValue> => ValueKind::list(ValueKind::model::<DocumentValue>()),
	}
}

model! {
	/// Response of `GET /{individuals,companies}/{id}/documents`.
	pub struct ListDocumentsResponse {
		/// Documents of the file.
		optional documents: Vec<Document> => ValueKind::list(ValueKind::model::<Document>()),
		/// Total number of documents.
		optional total_document: i64 => ValueKind::Int,
	}
}

model! {
	/// Body of `POST /{individuals,companies}/{id}/documents` when the file
	/// is fetched by the API from a URL.
	pub struct DocumentUploadParams {
		/// What the document is.
		required document_type: DocumentType => ValueKind::Enum,
		/// Where the API downloads the file from.
		optional url: String => ValueKind::String,
	}
}
