use super::Documents;
use crate::{
	client::{ApiRequest, Client, Error},
	models::{
		Individual, IndividualCreateParams, IndividualListParams, IndividualRetrieveParams,
		IndividualUpdateParams,
	},
};

const RESOURCE: &str = "individuals";

/// KYC files for natural persons.
#[derive(Debug, Clone, Copy)]
pub struct Individuals<'a> {
	client: &'a Client,
}

impl<'a> Individuals<'a> {
	pub(crate) const fn new(client: &'a Client) -> Self {
		Self { client }
	}

	/// Create an individual.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn create(&self, params: &IndividualCreateParams) -> Result<Individual, Error> {
		let request = ApiRequest::post(&[RESOURCE]).json(params).map_err(Error::Mapping)?;
		self.client.send(request).await
	}

	/// Fetch one individual.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn retrieve(
		&self,
		individual_id: &str,
		params: &IndividualRetrieveParams,
	) -> Result<Individual, Error> {
		let request = ApiRequest::get(&[RESOURCE, individual_id])
			.query(params)
			.map_err(Error::Mapping)?;
		self.client.send(request).await
	}

	/// Replace an individual's details.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn update(
		&self,
		individual_id: &str,
		params: &IndividualUpdateParams,
	) -> Result<Individual, Error> {
		let request = ApiRequest::put(&[RESOURCE, individual_id])
			.json(params)
			.map_err(Error::Mapping)?;
		self.client.send(request).await
	}

	/// List individuals matching `params`.
	///
	/// # Errors
	///
	/// Returns an error if the request fails or the response does not decode.
	pub async fn list(&self, params: &IndividualListParams) -> Result<Vec<Individual>, Error> {
		let request = ApiRequest::get(&[RESOURCE]).query(params).map_err(Error::Mapping)?;
		self.client.send(request).await
	}

	/// Delete an individual.
	///
	/// # Errors
	///
	/// Returns an error if the request fails.
	pub async fn delete(&self, individual_id: &str) -> Result<(), Error> {
		self.client
			.send(ApiRequest::delete(&[RESOURCE, individual_id]))
			.await
	}

	/// Documents attached to individuals.
	#[must_use]
	pub const fn documents(&self) -> Documents<'a> {
		Documents::new(self.client, RESOURCE)
	}
}
