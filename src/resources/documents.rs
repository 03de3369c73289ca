use crate::{
	client::{ApiRequest, Client, Error},
	models::{Document, DocumentUploadParams, ListDocumentsResponse},
};

/// Documents of the files under one resource.
#[derive(Debug, Clone, Copy)]
pub struct Documents<'a> {
	client: &'a Client,
	parent: &'static str,
}

impl<'a> Documents<'a> {
	pub(crate) const fn new(client: &'a Client, parent: &'static str) -> Self {
		Self { client, parent }
	}

	/// List the documents of file `id`.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn list(&self, id: &str) -> Result<ListDocumentsResponse, Error> {
		self.client
			.send(ApiRequest::get(&[self.parent, id, "documents"]))
			.await
	}

	/// Attach a document to file `id`; the API downloads it from
	/// `params.url`.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn upload(&self, id: &str, params: &DocumentUploadParams) -> Result<Document, Error> {
		let request = ApiRequest::post(&[self.parent, id, "documents"])
			.json(params)
			.map_err(Error::Mapping)?;
		self.client.send(request).await
	}
}
