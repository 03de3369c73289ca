#![deny(
	clippy::all,
	clippy::pedantic,
	clippy::nursery,
	missing_docs,
	dead_code
)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

/// Field descriptors, value kinds and the per-type schema cache.
pub mod schema;
pub use schema::{FieldDescriptor, Schema, ValueKind, schema_of};

/// Intermediate values and records exchanged between models and the mapper.
pub mod value;
pub use value::Nullable;

/// Conversion between wire JSON and typed models.
pub mod mapper;
pub use mapper::{FromWire, Model, decode, decode_list, encode};

/// Open string enums used by the API.
pub mod enums;

/// Business entities and request parameters.
pub mod models;

/// Client configuration and request dispatch.
#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub use client::{ApiRequest, Client, ClientConfig};

/// Errors returned by the API client.
#[cfg(feature = "client")]
pub mod error;
#[cfg(feature = "client")]
pub use error::{ApiError, Error};

/// Service methods grouped by resource.
#[cfg(feature = "client")]
pub mod resources;

/// HTTPS transport.
#[cfg(feature = "client")]
pub mod http;
