use hyper::StatusCode;
use std::{fmt::Display, time::Duration};

use crate::mapper;

/// A non-success response from the API.
#[derive(Debug, Clone)]
pub struct ApiError {
	status: StatusCode,
	message: String,
	body: Option<serde_json::Value>,
}

impl ApiError {
	/// Build from a status code and the raw response body.
	///
	/// The message is taken from the body's `message`, `detail` or `error`
	/// field when the body is JSON, and is the body text otherwise.
	#[must_use]
	pub fn new(status: StatusCode, body: &[u8]) -> Self {
		let json = serde_json::from_slice::<serde_json::Value>(body).ok();

		let message = json
			.as_ref()
			.and_then(|json| {
				["message", "detail", "error"]
					.into_iter()
					.find_map(|key| json.get(key).and_then(serde_json::Value::as_str))
			})
			.map_or_else(
				|| String::from_utf8_lossy(body).trim().to_string(),
				ToString::to_string,
			);

		Self {
			status,
			message,
			body: json,
		}
	}

	/// The HTTP status code.
	#[must_use]
	pub const fn status(&self) -> StatusCode {
		self.status
	}

	/// The error message reported by the API.
	#[must_use]
	pub fn message(&self) -> &str {
		&self.message
	}

	/// The response body, if it was JSON.
	#[must_use]
	pub const fn body(&self) -> Option<&serde_json::Value> {
		self.body.as_ref()
	}
}

impl Display for ApiError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.message.is_empty() {
			write!(f, "{}", self.status)
		} else {
			write!(f, "{}: {}", self.status, self.message)
		}
	}
}

/// Errors that can occur when calling the API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The request was malformed (400).
	#[error("bad request: {0}")]
	BadRequest(ApiError),
	/// The API key is missing or invalid (401).
	#[error("authentication failed: {0}")]
	Authentication(ApiError),
	/// The API key may not access the resource (403).
	#[error("permission denied: {0}")]
	PermissionDenied(ApiError),
	/// The resource does not exist (404).
	#[error("not found: {0}")]
	NotFound(ApiError),
	/// The request conflicts with the resource's state (409).
	#[error("conflict: {0}")]
	Conflict(ApiError),
	/// The request was understood but rejected (422).
	#[error("unprocessable entity: {0}")]
	UnprocessableEntity(ApiError),
	/// Too many requests (429).
	#[error("rate limited: {0}")]
	RateLimit(ApiError),
	/// The API failed (5xx).
	#[error("internal server error: {0}")]
	InternalServer(ApiError),
	/// Any other non-success status.
	#[error("unexpected status: {0}")]
	Status(ApiError),
	/// The connection failed or was interrupted.
	#[error("connection failed: {0}")]
	Connection(hyper::Error),
	/// No response within the configured timeout.
	#[error("request timed out after {0:?}")]
	Timeout(Duration),
	/// The base URL or a path could not be parsed.
	#[error("invalid url: {0}")]
	InvalidUrl(String),
	/// The request could not be assembled.
	#[error("failed to build request: {0}")]
	Request(hyper::http::Error),
	/// The response body is not JSON.
	#[error("invalid JSON in response: {0}")]
	Json(serde_json::Error),
	/// The JSON did not match the expected model.
	#[error("mapping failed: {0}")]
	Mapping(mapper::Error),
	/// The client configuration is incomplete.
	#[error("configuration error: {0}")]
	Config(String),
}

impl Error {
	/// Map a non-success status to its error variant.
	#[must_use]
	pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
		let error = ApiError::new(status, body);

		match status.as_u16() {
			400 => Self::BadRequest(error),
			401 => Self::Authentication(error),
			403 => Self::PermissionDenied(error),
			404 => Self::NotFound(error),
			409 => Self::Conflict(error),
			422 => Self::UnprocessableEntity(error),
			429 => Self::RateLimit(error),
			500..=599 => Self::InternalServer(error),
			_ => Self::Status(error),
		}
	}

	/// The API error, when the API answered with a non-success status.
	#[must_use]
	pub const fn api_error(&self) -> Option<&ApiError> {
		match self {
			Self::BadRequest(e)
			| Self::Authentication(e)
			| Self::PermissionDenied(e)
			| Self::NotFound(e)
			| Self::Conflict(e)
			| Self::UnprocessableEntity(e)
			| Self::RateLimit(e)
			| Self::InternalServer(e)
			| Self::Status(e) => Some(e),
			_ => None,
		}
	}

	/// The HTTP status, when the API answered with a non-success status.
	#[must_use]
	pub fn status(&self) -> Option<StatusCode> {
		self.api_error().map(ApiError::status)
	}
}
