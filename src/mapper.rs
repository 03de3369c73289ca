use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value as Json};
use std::collections::BTreeMap;

use crate::{
	schema::{Schema, ValueKind, schema_of},
	value::{Record, Value},
};

/// A type with a schema, convertible to and from wire values.
///
/// Implementations are generated by the crate's `model!` macro.
pub trait Model: Sized + 'static {
	/// Name of the type, reported in errors.
	const NAME: &'static str;

	/// Describe the fields of the type. Called once per process; use
	/// [`schema_of`] to get the cached result.
	fn schema() -> Schema;

	/// Assemble an instance from a decoded record.
	///
	/// # Errors
	///
	/// Returns an error if a required field is missing or a value has the
	/// wrong shape.
	fn from_record(record: Record) -> Result<Self, Error>;

	/// Collect the set fields of the instance.
	fn to_record(&self) -> Record;
}

/// Structural failures of [`decode`] and [`encode`].
///
/// `field` is the wire path of the failing value, such as
/// `person.first_name` or `checks[2].name`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// A required key was absent.
	#[error("{type_name}: missing required field `{field}`")]
	MissingRequiredField {
		/// The model being processed.
		type_name: &'static str,
		/// Path of the missing field.
		field: String,
	},
	/// A value's shape disagrees with the declared kind.
	#[error("{type_name}: field `{field}` expected {expected}, found {found}")]
	TypeMismatch {
		/// The model being processed.
		type_name: &'static str,
		/// Path of the offending field.
		field: String,
		/// The declared kind.
		expected: String,
		/// The shape actually found.
		found: &'static str,
	},
	/// A date-time string could not be parsed.
	#[error("{type_name}: field `{field}` holds an invalid date-time {value:?}")]
	InvalidDateFormat {
		/// The model being processed.
		type_name: &'static str,
		/// Path of the offending field.
		field: String,
		/// The unparseable input.
		value: String,
	},
	/// A list or map field received something else.
	#[error("{type_name}: field `{field}` expected {expected}, found {found}")]
	InvalidCollectionShape {
		/// The model being processed.
		type_name: &'static str,
		/// Path of the offending field.
		field: String,
		/// `array` or `object`.
		expected: &'static str,
		/// The shape actually found.
		found: &'static str,
	},
	/// A local value does not fit its declared kind.
	#[error("{type_name}: cannot encode field `{field}`: {reason}")]
	UnencodableValue {
		/// The model being processed.
		type_name: &'static str,
		/// Path of the offending field.
		field: String,
		/// What went wrong.
		reason: String,
	},
}

impl Error {
	/// The model that was being processed.
	#[must_use]
	pub const fn type_name(&self) -> &'static str {
		match self {
			Self::MissingRequiredField { type_name, .. }
			| Self::TypeMismatch { type_name, .. }
			| Self::InvalidDateFormat { type_name, .. }
			| Self::InvalidCollectionShape { type_name, .. }
			| Self::UnencodableValue { type_name, .. } => type_name,
		}
	}

	/// Wire path of the failing field.
	#[must_use]
	pub fn field(&self) -> &str {
		match self {
			Self::MissingRequiredField { field, .. }
			| Self::TypeMismatch { field, .. }
			| Self::InvalidDateFormat { field, .. }
			| Self::InvalidCollectionShape { field, .. }
			| Self::UnencodableValue { field, .. } => field,
		}
	}
}

/// A type that can be produced from a whole response body.
pub trait FromWire: Sized {
	/// Decode `wire` into `Self`.
	///
	/// # Errors
	///
	/// Returns an error if `wire` does not match the expected shape.
	fn from_wire(wire: &Json) -> Result<Self, Error>;
}

impl<T: Model> FromWire for Vec<T> {
	fn from_wire(wire: &Json) -> Result<Self, Error> {
		decode_list(wire)
	}
}

impl FromWire for Json {
	fn from_wire(wire: &Json) -> Result<Self, Error> {
		Ok(wire.clone())
	}
}

impl FromWire for () {
	fn from_wire(_: &Json) -> Result<Self, Error> {
		Ok(())
	}
}

/// Decode a wire value into a `T`.
///
/// Keys that `T` does not declare are ignored. Optional keys that are
/// absent leave their field unset.
///
/// # Errors
///
/// Fails on the first field that is missing, mistyped or malformed; no
/// partially populated instance is returned.
pub fn decode<T: Model>(wire: &Json) -> Result<T, Error> {
	let schema = schema_of::<T>();
	let record = decode_record(&schema, wire, "").inspect_err(|e| {
		tracing::debug!(type_name = T::NAME, error = %e, "failed to decode model");
	})?;

	T::from_record(record)
}

/// Decode a wire array into a list of `T`, preserving order.
///
/// # Errors
///
/// Fails if `wire` is not an array or if any element fails to decode.
pub fn decode_list<T: Model>(wire: &Json) -> Result<Vec<T>, Error> {
	let items = wire.as_array().ok_or_else(|| Error::InvalidCollectionShape {
		type_name: T::NAME,
		field: display_path(""),
		expected: "array",
		found: json_type(wire),
	})?;

	let schema = schema_of::<T>();
	items
		.iter()
		.enumerate()
		.map(|(i, item)| {
			let record = decode_record(&schema, item, &format!("[{i}]"))?;
			T::from_record(record)
		})
		.collect()
}

/// Encode `model` into a wire value, omitting every unset field.
///
/// # Errors
///
/// Fails if a set value does not fit its declared kind.
pub fn encode<T: Model>(model: &T) -> Result<Json, Error> {
	let schema = schema_of::<T>();
	encode_record(&schema, &model.to_record(), "")
}

fn decode_record(schema: &Schema, wire: &Json, path: &str) -> Result<Record, Error> {
	let object = wire.as_object().ok_or_else(|| Error::TypeMismatch {
		type_name: schema.type_name(),
		field: display_path(path),
		expected: "object".to_string(),
		found: json_type(wire),
	})?;

	let mut record = Record::new(schema.type_name());

	for field in schema.fields() {
		let field_path = child_path(path, field.wire_name());

		match object.get(field.wire_name()) {
			None if field.is_required() => {
				return Err(Error::MissingRequiredField {
					type_name: schema.type_name(),
					field: field_path,
				});
			},
			None => {},
			Some(Json::Null) if field.is_nullable() => {
				record.insert(field.local_name(), Value::Null);
			},
			Some(Json::Null) if matches!(field.kind(), ValueKind::Mixed) => {
				record.insert(field.local_name(), Value::Mixed(Json::Null));
			},
			Some(Json::Null) if field.is_required() => {
				return Err(Error::TypeMismatch {
					type_name: schema.type_name(),
					field: field_path,
					expected: field.kind().to_string(),
					found: "null",
				});
			},
			Some(Json::Null) => {},
			Some(value) => {
				let decoded = decode_value(field.kind(), value, schema.type_name(), &field_path)?;
				record.insert(field.local_name(), decoded);
			},
		}
	}

	Ok(record)
}

fn decode_value(
	kind: &ValueKind,
	wire: &Json,
	type_name: &'static str,
	path: &str,
) -> Result<Value, Error> {
	let mismatch = || Error::TypeMismatch {
		type_name,
		field: display_path(path),
		expected: kind.to_string(),
		found: json_type(wire),
	};

	match kind {
		ValueKind::String | ValueKind::Enum => wire
			.as_str()
			.map(|s| Value::String(s.to_string()))
			.ok_or_else(mismatch),
		ValueKind::Int => wire.as_i64().map(Value::Int).ok_or_else(mismatch),
		ValueKind::Float => wire.as_f64().map(Value::Float).ok_or_else(mismatch),
		ValueKind::Bool => wire.as_bool().map(Value::Bool).ok_or_else(mismatch),
		ValueKind::DateTime => {
			let raw = wire.as_str().ok_or_else(mismatch)?;
			parse_datetime(raw)
				.map(Value::DateTime)
				.ok_or_else(|| Error::InvalidDateFormat {
					type_name,
					field: display_path(path),
					value: raw.to_string(),
				})
		},
		ValueKind::Model(nested) => decode_record(&nested(), wire, path).map(Value::Record),
		ValueKind::List(element) => {
			let items = wire.as_array().ok_or_else(|| Error::InvalidCollectionShape {
				type_name,
				field: display_path(path),
				expected: "array",
				found: json_type(wire),
			})?;

			items
				.iter()
				.enumerate()
				.map(|(i, item)| decode_value(element, item, type_name, &format!("{path}[{i}]")))
				.collect::<Result<Vec<_>, _>>()
				.map(Value::List)
		},
		ValueKind::Map(element) => {
			let entries = wire.as_object().ok_or_else(|| Error::InvalidCollectionShape {
				type_name,
				field: display_path(path),
				expected: "object",
				found: json_type(wire),
			})?;

			entries
				.iter()
				.map(|(key, item)| {
					decode_value(element, item, type_name, &child_path(path, key))
						.map(|value| (key.clone(), value))
				})
				.collect::<Result<BTreeMap<_, _>, _>>()
				.map(Value::Map)
		},
		ValueKind::Mixed => Ok(Value::Mixed(wire.clone())),
	}
}

fn encode_record(schema: &Schema, record: &Record, path: &str) -> Result<Json, Error> {
	if let Some((name, _)) = record.iter().find(|(name, _)| schema.field(name).is_none()) {
		return Err(Error::UnencodableValue {
			type_name: schema.type_name(),
			field: child_path(path, name),
			reason: "field is not declared by the schema".to_string(),
		});
	}

	let mut object = Map::new();

	for field in schema.fields() {
		let field_path = child_path(path, field.wire_name());

		let encoded = match record.get(field.local_name()) {
			None if field.is_required() => {
				return Err(Error::UnencodableValue {
					type_name: schema.type_name(),
					field: field_path,
					reason: "required field is unset".to_string(),
				});
			},
			None => continue,
			Some(Value::Null) if field.is_nullable() => Json::Null,
			Some(value) => encode_value(field.kind(), value, schema.type_name(), &field_path)?,
		};

		object.insert(field.wire_name().to_string(), encoded);
	}

	Ok(Json::Object(object))
}

fn encode_value(
	kind: &ValueKind,
	value: &Value,
	type_name: &'static str,
	path: &str,
) -> Result<Json, Error> {
	let unencodable = |reason: String| Error::UnencodableValue {
		type_name,
		field: display_path(path),
		reason,
	};

	match (kind, value) {
		(ValueKind::String | ValueKind::Enum, Value::String(s)) => Ok(Json::String(s.clone())),
		(ValueKind::Int | ValueKind::Float, Value::Int(i)) => Ok(Json::Number((*i).into())),
		(ValueKind::Float, Value::Float(f)) => Number::from_f64(*f)
			.map(Json::Number)
			.ok_or_else(|| unencodable(format!("{f} is not a finite number"))),
		(ValueKind::Bool, Value::Bool(b)) => Ok(Json::Bool(*b)),
		(ValueKind::DateTime, Value::DateTime(dt)) => {
			Ok(Json::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
		},
		(ValueKind::Model(nested), Value::Record(record)) => encode_record(&nested(), record, path),
		(ValueKind::List(element), Value::List(items)) => items
			.iter()
			.enumerate()
			.map(|(i, item)| encode_value(element, item, type_name, &format!("{path}[{i}]")))
			.collect::<Result<Vec<_>, _>>()
			.map(Json::Array),
		(ValueKind::Map(element), Value::Map(entries)) => entries
			.iter()
			.map(|(key, item)| {
				encode_value(element, item, type_name, &child_path(path, key))
					.map(|encoded| (key.clone(), encoded))
			})
			.collect::<Result<Map<_, _>, _>>()
			.map(Json::Object),
		(ValueKind::Mixed, Value::Mixed(json)) => Ok(json.clone()),
		(kind, value) => Err(unencodable(format!(
			"expected {kind}, found {}",
			value.kind_name()
		))),
	}
}

/// Parse the timestamp forms the API emits: RFC 3339, or a naive
/// date-time (space or `T` separated) taken as UTC.
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return Some(dt.with_timezone(&Utc));
	}

	["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
		.into_iter()
		.find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
		.map(|naive| naive.and_utc())
}

fn child_path(parent: &str, name: &str) -> String {
	if parent.is_empty() {
		name.to_string()
	} else {
		format!("{parent}.{name}")
	}
}

fn display_path(path: &str) -> String {
	if path.is_empty() {
		"<root>".to_string()
	} else {
		path.to_string()
	}
}

const fn json_type(value: &Json) -> &'static str {
	match value {
		Json::Null => "null",
		Json::Bool(_) => "boolean",
		Json::Number(_) => "number",
		Json::String(_) => "string",
		Json::Array(_) => "array",
		Json::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use crate::{
		enums::VerificationState,
		models::{Certificat, Check, Individual, IndividualCreateParams, Person, TechnicalData},
		value::Nullable,
	};

	#[test]
	fn individual_creation_round_trip() {
		let wire = json!({"workspace_id": "wk_123", "person": {"first_name": "Jane"}});

		let params: IndividualCreateParams = decode(&wire).unwrap();
		assert_eq!(params.workspace_id, "wk_123");
		assert_eq!(
			params.person.as_ref().and_then(|p| p.first_name.as_deref()),
			Some("Jane")
		);
		assert_eq!(params.source_id, None);
		assert_eq!(params.technical_data, None);

		assert_eq!(encode(&params).unwrap(), wire);
	}

	#[test]
	fn unset_fields_are_omitted() {
		let person = Person {
			last_name: Some("Doe".into()),
			..Person::default()
		};

		let encoded = encode(&person).unwrap();
		assert_eq!(encoded, json!({"last_name": "Doe"}));
		assert!(!encoded.as_object().unwrap().contains_key("first_name"));
	}

	#[test]
	fn unknown_keys_are_ignored() {
		let wire = json!({"first_name": "Jane", "shoe_size": 38});
		let person: Person = decode(&wire).unwrap();

		assert_eq!(person.first_name.as_deref(), Some("Jane"));
		assert_eq!(encode(&person).unwrap(), json!({"first_name": "Jane"}));
	}

	#[test]
	fn missing_required_field_names_the_field() {
		let err = decode::<IndividualCreateParams>(&json!({"person": {}})).unwrap_err();

		assert_eq!(
			err,
			Error::MissingRequiredField {
				type_name: "IndividualCreateParams",
				field: "workspace_id".into(),
			}
		);
	}

	#[test]
	fn nested_errors_carry_the_wire_path() {
		let wire = json!({"id": "ind_1", "checks": [{"name": "a"}, {"name": 7}]});
		let err = decode::<Individual>(&wire).unwrap_err();

		assert_eq!(err.type_name(), "Check");
		assert_eq!(err.field(), "checks[1].name");
		assert!(matches!(err, Error::TypeMismatch { found: "number", .. }));
	}

	#[test]
	fn numeric_strings_are_not_widened() {
		let err = decode::<Check>(&json!({"weight": "3"})).unwrap_err();
		assert!(matches!(err, Error::TypeMismatch { .. }));

		let err = decode::<Check>(&json!({"weight": 1.5})).unwrap_err();
		assert!(matches!(err, Error::TypeMismatch { .. }));
	}

	#[test]
	fn list_fields_keep_wire_order() {
		let wire = json!({"id": "ind_1", "checks": [{"name": "a"}, {"name": "b"}, {"name": "c"}]});
		let individual: Individual = decode(&wire).unwrap();

		let names: Vec<_> = individual
			.checks
			.unwrap()
			.into_iter()
			.filter_map(|c| c.name)
			.collect();
		assert_eq!(names, ["a", "b", "c"]);
	}

	#[test]
	fn list_field_with_wrong_shape() {
		let wire = json!({"id": "ind_1", "checks": {"name": "a"}});
		let err = decode::<Individual>(&wire).unwrap_err();

		assert_eq!(
			err,
			Error::InvalidCollectionShape {
				type_name: "Individual",
				field: "checks".into(),
				expected: "array",
				found: "object",
			}
		);
	}

	#[test]
	fn unknown_enum_values_are_kept() {
		let wire = json!({"id": "ind_1", "state": "QUARANTINED"});
		let individual: Individual = decode(&wire).unwrap();

		let state = individual.state.unwrap();
		assert_eq!(state.as_str(), "QUARANTINED");
		assert!(!state.is_known());
		assert_ne!(state, VerificationState::PROCESSED);
	}

	#[test]
	fn date_times_parse_and_format() {
		let certificat: Certificat =
			decode(&json!({"created_at": "2024-03-05T10:20:30Z"})).unwrap();
		let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap();
		assert_eq!(certificat.created_at, Some(expected));

		let naive: Certificat = decode(&json!({"created_at": "2024-03-05 10:20:30"})).unwrap();
		assert_eq!(naive.created_at, Some(expected));

		assert_eq!(
			encode(&certificat).unwrap(),
			json!({"created_at": "2024-03-05T10:20:30Z"})
		);
	}

	#[test]
	fn bad_date_times_are_reported() {
		let err = decode::<Certificat>(&json!({"created_at": "yesterday"})).unwrap_err();

		assert_eq!(
			err,
			Error::InvalidDateFormat {
				type_name: "Certificat",
				field: "created_at".into(),
				value: "yesterday".into(),
			}
		);
	}

	#[test]
	fn explicit_null_survives_round_trip() {
		let wire = json!({"approved_at": null, "language": "fra"});
		let data: TechnicalData = decode(&wire).unwrap();

		assert_eq!(data.approved_at, Nullable::Null);
		assert!(data.rejected_at.is_unset());
		assert_eq!(encode(&data).unwrap(), wire);
	}

	#[test]
	fn null_on_plain_optional_field_reads_as_unset() {
		let person: Person = decode(&json!({"first_name": null})).unwrap();

		assert_eq!(person.first_name, None);
		assert_eq!(encode(&person).unwrap(), json!({}));
	}

	#[test]
	fn null_on_required_field_is_rejected() {
		let err = decode::<IndividualCreateParams>(&json!({"workspace_id": null})).unwrap_err();
		assert!(matches!(err, Error::TypeMismatch { found: "null", .. }));
	}

	#[test]
	fn mixed_values_pass_through() {
		let wire = json!({"name": "siren", "value": {"nested": [1, "two", null]}});
		let property: crate::models::Property = decode(&wire).unwrap();

		assert_eq!(property.value, Some(json!({"nested": [1, "two", null]})));
		assert_eq!(encode(&property).unwrap(), wire);
	}

	#[test]
	fn non_object_payloads_are_rejected() {
		let err = decode::<Person>(&json!(["Jane"])).unwrap_err();
		assert_eq!(err.field(), "<root>");

		let err = decode_list::<Person>(&json!({"first_name": "Jane"})).unwrap_err();
		assert!(matches!(err, Error::InvalidCollectionShape { expected: "array", .. }));
	}

	#[test]
	fn non_finite_floats_cannot_be_encoded() {
		let risk = crate::models::Risk {
			score: Some(f64::NAN),
			..Default::default()
		};

		let err = encode(&risk).unwrap_err();
		assert!(matches!(err, Error::UnencodableValue { .. }));
		assert_eq!(err.field(), "score");
	}

	model! {
		/// A model with a map field.
		pub struct Scoreboard {
			/// Points per player.
			optional scores: BTreeMap<String, i64> => ValueKind::map(ValueKind::Int),
		}
	}

	#[test]
	fn map_fields_keep_their_keys() {
		let wire = json!({"scores": {"b": 2, "a": 1, "Mixed Case": 3}});
		let board: Scoreboard = decode(&wire).unwrap();

		let scores = board.scores.as_ref().unwrap();
		assert_eq!(scores.get("a"), Some(&1));
		assert_eq!(scores.get("Mixed Case"), Some(&3));
		assert_eq!(encode(&board).unwrap(), wire);
	}

	#[test]
	fn map_field_with_wrong_shape() {
		let err = decode::<Scoreboard>(&json!({"scores": [1]})).unwrap_err();

		assert_eq!(
			err,
			Error::InvalidCollectionShape {
				type_name: "Scoreboard",
				field: "scores".into(),
				expected: "object",
				found: "array",
			}
		);
	}

	#[test]
	fn map_values_are_checked_by_key() {
		let err = decode::<Scoreboard>(&json!({"scores": {"a": "x"}})).unwrap_err();

		assert!(matches!(err, Error::TypeMismatch { found: "string", .. }));
		assert_eq!(err.field(), "scores.a");
	}

	#[test]
	fn integral_floats_encode_as_floats() {
		let risk: crate::models::Risk = decode(&json!({"score": 3})).unwrap();
		assert_eq!(risk.score, Some(3.0));

		let encoded = encode(&risk).unwrap();
		assert_eq!(encoded, json!({"score": 3.0}));
		assert_eq!(decode::<crate::models::Risk>(&encoded).unwrap(), risk);
	}

	#[test]
	fn decoding_twice_gives_equal_instances() {
		let wire = json!({"id": "ind_1", "person": {"first_name": "Jane"}, "number": 4});

		let first: Individual = decode(&wire).unwrap();
		let second: Individual = decode(&wire).unwrap();
		assert_eq!(first, second);
	}
}
