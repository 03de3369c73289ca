use hyper::{Body, Method, Request, header, header::HeaderValue};
use std::{fmt, time::Duration};
use url::Url;

pub use crate::error::{ApiError, Error};
use crate::{
	http::{self, HttpClient},
	mapper::{self, FromWire, Model},
	resources::{Companies, Individuals},
};

/// Region used to build the default base URL.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// How long a request may take, response body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "Api-Key";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "DATALEON_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "DATALEON_BASE_URL";

/// Environment variable selecting the region of the default base URL.
pub const REGION_ENV: &str = "DATALEON_REGION";

/// Environment variable overriding the timeout, in seconds.
pub const TIMEOUT_ENV: &str = "DATALEON_TIMEOUT_SECS";

/// The base URL of the API in `region`.
#[must_use]
pub fn default_base_url(region: &str) -> String {
	format!("https://inference.{region}.dataleon.ai")
}

/// Settings for a [`Client`].
#[derive(Clone)]
pub struct ClientConfig {
	base_url: String,
	api_key: String,
	timeout: Duration,
}

impl ClientConfig {
	/// Settings for the default region with the given API key.
	#[must_use]
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			timeout: DEFAULT_TIMEOUT,
			base_url: default_base_url(DEFAULT_REGION),
		}
	}

	/// Read the settings from the `DATALEON_*` environment variables.
	///
	/// # Errors
	///
	/// Returns an error if `DATALEON_API_KEY` is unset or if
	/// `DATALEON_TIMEOUT_SECS` is not a number.
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let api_key = lookup(API_KEY_ENV)
			.filter(|key| !key.is_empty())
			.ok_or_else(|| Error::Config(format!("{API_KEY_ENV} is not set")))?;

		let mut config = Self::new(api_key);

		if let Some(region) = lookup(REGION_ENV) {
			config = config.with_region(&region);
		}
		if let Some(base_url) = lookup(BASE_URL_ENV) {
			config = config.with_base_url(base_url);
		}
		if let Some(seconds) = lookup(TIMEOUT_ENV) {
			let seconds = seconds
				.parse()
				.map_err(|e| Error::Config(format!("{TIMEOUT_ENV}: {e}")))?;
			config = config.with_timeout(Duration::from_secs(seconds));
		}

		Ok(config)
	}

	/// Send requests to `base_url` instead of the regional default.
	#[must_use]
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Use the default base URL of `region`.
	#[must_use]
	pub fn with_region(mut self, region: &str) -> Self {
		self.base_url = default_base_url(region);
		self
	}

	/// Give up on requests after `timeout`.
	#[must_use]
	pub const fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// The configured base URL.
	#[must_use]
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// The configured timeout.
	#[must_use]
	pub const fn timeout(&self) -> Duration {
		self.timeout
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("base_url", &self.base_url)
			.field("api_key", &"<redacted>")
			.field("timeout", &self.timeout)
			.finish()
	}
}

/// One call to the API: verb, path, query and body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
	method: Method,
	segments: Vec<String>,
	query: Vec<(String, String)>,
	body: Option<serde_json::Value>,
}

impl ApiRequest {
	/// A request for the path made of `segments`. Each segment is
	/// percent-encoded on its own.
	#[must_use]
	pub fn new(method: Method, segments: &[&str]) -> Self {
		Self {
			method,
			segments: segments.iter().map(ToString::to_string).collect(),
			query: Vec::new(),
			body: None,
		}
	}

	/// A `GET` request.
	#[must_use]
	pub fn get(segments: &[&str]) -> Self {
		Self::new(Method::GET, segments)
	}

	/// A `POST` request.
	#[must_use]
	pub fn post(segments: &[&str]) -> Self {
		Self::new(Method::POST, segments)
	}

	/// A `PUT` request.
	#[must_use]
	pub fn put(segments: &[&str]) -> Self {
		Self::new(Method::PUT, segments)
	}

	/// A `DELETE` request.
	#[must_use]
	pub fn delete(segments: &[&str]) -> Self {
		Self::new(Method::DELETE, segments)
	}

	/// Append the set fields of `params` to the query string.
	///
	/// # Errors
	///
	/// Returns an error if `params` cannot be encoded.
	pub fn query<T: Model>(mut self, params: &T) -> Result<Self, mapper::Error> {
		let encoded = mapper::encode(params)?;
		self.query.extend(query_pairs(&encoded));
		Ok(self)
	}

	/// Send the encoded `body` as JSON.
	///
	/// # Errors
	///
	/// Returns an error if `body` cannot be encoded.
	pub fn json<T: Model>(mut self, body: &T) -> Result<Self, mapper::Error> {
		self.body = Some(mapper::encode(body)?);
		Ok(self)
	}

	/// The HTTP method.
	#[must_use]
	pub const fn method(&self) -> &Method {
		&self.method
	}

	/// The query parameters, in order.
	#[must_use]
	pub fn query_params(&self) -> &[(String, String)] {
		&self.query
	}

	/// The JSON body, if any.
	#[must_use]
	pub const fn body(&self) -> Option<&serde_json::Value> {
		self.body.as_ref()
	}
}

/// Flatten an encoded parameter object into query pairs. Lists repeat their
/// key, nested objects are sent as JSON text, and `null` is skipped.
fn query_pairs(encoded: &serde_json::Value) -> Vec<(String, String)> {
	fn scalar(value: &serde_json::Value) -> Option<String> {
		match value {
			serde_json::Value::Null => None,
			serde_json::Value::String(s) => Some(s.clone()),
			other => Some(other.to_string()),
		}
	}

	let Some(object) = encoded.as_object() else {
		return Vec::new();
	};

	object
		.iter()
		.flat_map(|(key, value)| {
			let values: Vec<String> = match value {
				serde_json::Value::Array(items) => items.iter().filter_map(scalar).collect(),
				other => scalar(other).into_iter().collect(),
			};

			values.into_iter().map(move |value| (key.clone(), value))
		})
		.collect()
}

/// A client for the Dataleon API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct Client {
	http: HttpClient,
	base_url: Url,
	api_key: HeaderValue,
	timeout: Duration,
}

impl Client {
	/// Create a client from `config`.
	///
	/// # Errors
	///
	/// Returns an error if the base URL is not a valid absolute URL or if
	/// the API key is empty or not a valid header value.
	pub fn new(config: ClientConfig) -> Result<Self, Error> {
		let base_url = Url::parse(&config.base_url)
			.map_err(|e| Error::InvalidUrl(format!("{}: {e}", config.base_url)))?;

		if base_url.cannot_be_a_base() {
			return Err(Error::InvalidUrl(format!(
				"{} cannot be used as a base URL",
				config.base_url
			)));
		}

		if config.api_key.is_empty() {
			return Err(Error::Config("API key is empty".to_string()));
		}

		let mut api_key = HeaderValue::from_str(&config.api_key)
			.map_err(|e| Error::Config(format!("API key is not a valid header value: {e}")))?;
		api_key.set_sensitive(true);

		tracing::debug!(base_url = %base_url, timeout = ?config.timeout, "created API client");

		Ok(Self {
			api_key,
			base_url,
			http: http::client(),
			timeout: config.timeout,
		})
	}

	/// Create a client from the `DATALEON_*` environment variables.
	///
	/// # Errors
	///
	/// See [`ClientConfig::from_env`] and [`Client::new`].
	pub fn from_env() -> Result<Self, Error> {
		Self::new(ClientConfig::from_env()?)
	}

	/// The base URL requests are sent to.
	#[must_use]
	pub const fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Operations on individuals (KYC).
	#[must_use]
	pub const fn individuals(&self) -> Individuals<'_> {
		Individuals::new(self)
	}

	/// Operations on companies (KYB).
	#[must_use]
	pub const fn companies(&self) -> Companies<'_> {
		Companies::new(self)
	}

	/// The full URL `request` is sent to.
	///
	/// # Errors
	///
	/// Returns an error if the base URL cannot take path segments.
	pub fn url(&self, request: &ApiRequest) -> Result<Url, Error> {
		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|()| Error::InvalidUrl(self.base_url.to_string()))?
			.pop_if_empty()
			.extend(&request.segments);

		if !request.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&request.query);
		}

		Ok(url)
	}

	/// Send a request and decode the response into `R`.
	///
	/// An empty success body decodes from `null`, which suits `()`.
	///
	/// # Errors
	///
	/// - If the request cannot be built or the connection fails.
	/// - If no response arrives within the timeout.
	/// - If the API answers with a non-success status.
	/// - If the response is not JSON or does not match `R`.
	pub async fn send<R: FromWire>(&self, request: ApiRequest) -> Result<R, Error> {
		let url = self.url(&request)?;

		let body = match &request.body {
			Some(json) => Body::from(serde_json::to_vec(json).map_err(Error::Json)?),
			None => Body::empty(),
		};

		let mut builder = Request::builder()
			.method(request.method.clone())
			.uri(url.as_str())
			.header(API_KEY_HEADER, self.api_key.clone())
			.header(header::ACCEPT, "application/json");

		if request.body.is_some() {
			builder = builder.header(header::CONTENT_TYPE, "application/json");
		}

		let http_request = builder.body(body).map_err(Error::Request)?;

		tracing::debug!(method = %request.method, url = %url, "sending request");

		let (status, bytes) = tokio::time::timeout(self.timeout, async {
			let response = self.http.request(http_request).await?;
			let status = response.status();
			let bytes = hyper::body::to_bytes(response.into_body()).await?;

			Ok::<_, hyper::Error>((status, bytes))
		})
		.await
		.map_err(|_| Error::Timeout(self.timeout))?
		.map_err(Error::Connection)?;

		tracing::debug!(status = status.as_u16(), length = bytes.len(), "received response");

		if !status.is_success() {
			let error = Error::from_status(status, &bytes);
			tracing::debug!(method = %request.method, url = %url, "request failed: {error}");
			return Err(error);
		}

		let json = if bytes.is_empty() {
			serde_json::Value::Null
		} else {
			serde_json::from_slice(&bytes).map_err(Error::Json)?
		};

		R::from_wire(&json).map_err(Error::Mapping)
	}
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client")
			.field("base_url", &self.base_url.as_str())
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}
