use super::Documents;
use crate::{
	client::{ApiRequest, Client, Error},
	models::{
		CompanyCreateParams, CompanyListParams, CompanyRegistration, CompanyRetrieveParams,
		CompanyUpdateParams,
	},
};

const RESOURCE: &str = "companies";

/// KYB files for legal entities.
#[derive(Debug, Clone, Copy)]
pub struct Companies<'a> {
	client: &'a Client,
}

impl<'a> Companies<'a> {
	pub(crate) const fn new(client: &'a Client) -> Self {
		Self { client }
	}

	/// Register a company.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn create(&self, params: &CompanyCreateParams) -> Result<CompanyRegistration, Error> {
		let request = ApiRequest::post(&[RESOURCE]).json(params).map_err(Error::Mapping)?;
		self.client.send(request).await
	}

	/// Fetch one company.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn retrieve(
		&self,
		company_id: &str,
		params: &CompanyRetrieveParams,
	) -> Result<CompanyRegistration, Error> {
		let request = ApiRequest::get(&[RESOURCE, company_id])
			.query(params)
			.map_err(Error::Mapping)?;
		self.client.send(request).await
	}

	/// Replace a company's details.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn update(
		&self,
		company_id: &str,
		params: &CompanyUpdateParams,
	) -> Result<CompanyRegistration, Error> {
		let request = ApiRequest::put(&[RESOURCE, company_id])
			.json(params)
			.map_err(Error::Mapping)?;
		self.client.send(request).await
	}

	/// List companies matching `params`.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn list(
		&self,
		params: &CompanyListParams,
	) -> Result<Vec<CompanyRegistration>, Error> {
		let request = ApiRequest::get(&[RESOURCE]).query(params).map_err(Error::Mapping)?;
		self.client.send(request).await
	}

	/// Delete a company.
	///
	/// # Errors
	///
	/// Returns an error if the request fails.
	pub async fn delete(&self, company_id: &str) -> Result<(), Error> {
		self.client.send(ApiRequest::delete(&[RESOURCE, company_id])).await
	}

	/// Documents attached to companies.
	#[must_use]
	pub const fn documents(&self) -> Documents<'a> {
		Documents::new(self.client, RESOURCE)
	}
}
