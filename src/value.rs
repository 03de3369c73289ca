use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, btree_map};

use crate::mapper::Error;

/// A decoded wire value, checked against the field kind that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// An explicit `null` on a nullable field.
	Null,
	/// A boolean.
	Bool(bool),
	/// An integer.
	Int(i64),
	/// A floating point number.
	Float(f64),
	/// A string, also used for enum constants.
	String(String),
	/// A parsed timestamp.
	DateTime(DateTime<Utc>),
	/// The elements of a list field, in wire order.
	List(Vec<Value>),
	/// The entries of a map field.
	Map(BTreeMap<String, Value>),
	/// The set fields of a nested model.
	Record(Record),
	/// An untyped value passed through as-is.
	Mixed(serde_json::Value),
}

impl Value {
	/// A short name for the variant, used in error messages.
	#[must_use]
	pub const fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Int(_) => "integer",
			Self::Float(_) => "number",
			Self::String(_) => "string",
			Self::DateTime(_) => "date-time",
			Self::List(_) => "array",
			Self::Map(_) => "map",
			Self::Record(_) => "object",
			Self::Mixed(_) => "any value",
		}
	}
}

/// An optional field whose wire form distinguishes an explicit `null` from
/// an omitted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nullable<T> {
	/// Never supplied. Omitted from encoded output.
	#[default]
	Unset,
	/// Explicitly `null`.
	Null,
	/// Set to a value.
	Value(T),
}

impl<T> Nullable<T> {
	/// Whether the field was never supplied.
	#[must_use]
	pub const fn is_unset(&self) -> bool {
		matches!(self, Self::Unset)
	}

	/// Whether the field is explicitly `null`.
	#[must_use]
	pub const fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// The value, if one is set.
	#[must_use]
	pub const fn value(&self) -> Option<&T> {
		match self {
			Self::Value(value) => Some(value),
			Self::Unset | Self::Null => None,
		}
	}

	/// Collapse into an `Option`, losing the unset/null distinction.
	#[must_use]
	pub fn into_option(self) -> Option<T> {
		match self {
			Self::Value(value) => Some(value),
			Self::Unset | Self::Null => None,
		}
	}
}

impl<T> From<T> for Nullable<T> {
	fn from(value: T) -> Self {
		Self::Value(value)
	}
}

/// Why a [`Value`] could not be turned into a Rust type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
	/// The value has the wrong shape.
	#[error("expected {expected}, found {found}")]
	Unexpected {
		/// What the Rust type needs.
		expected: &'static str,
		/// What was found instead.
		found: &'static str,
	},
	/// A nested model failed to assemble.
	#[error(transparent)]
	Nested(Box<Error>),
}

impl ValueError {
	const fn unexpected(expected: &'static str, found: &Value) -> Self {
		Self::Unexpected {
			expected,
			found: found.kind_name(),
		}
	}
}

/// Conversion out of a checked [`Value`].
pub trait FromValue: Sized {
	/// Convert `value`, failing if its shape does not fit.
	///
	/// # Errors
	///
	/// Returns an error if the value has the wrong variant.
	fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// Conversion into a [`Value`].
pub trait IntoValue {
	/// Produce the value to be encoded.
	fn to_value(&self) -> Value;
}

impl FromValue for String {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::String(s) => Ok(s),
			other => Err(ValueError::unexpected("string", &other)),
		}
	}
}

impl IntoValue for String {
	fn to_value(&self) -> Value {
		Value::String(self.clone())
	}
}

impl FromValue for i64 {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Int(i) => Ok(i),
			other => Err(ValueError::unexpected("integer", &other)),
		}
	}
}

impl IntoValue for i64 {
	fn to_value(&self) -> Value {
		Value::Int(*self)
	}
}

impl FromValue for f64 {
	#[allow(clippy::cast_precision_loss, reason = "integers are valid wire numbers")]
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Float(f) => Ok(f),
			Value::Int(i) => Ok(i as Self),
			other => Err(ValueError::unexpected("number", &other)),
		}
	}
}

impl IntoValue for f64 {
	fn to_value(&self) -> Value {
		Value::Float(*self)
	}
}

impl FromValue for bool {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Bool(b) => Ok(b),
			other => Err(ValueError::unexpected("boolean", &other)),
		}
	}
}

impl IntoValue for bool {
	fn to_value(&self) -> Value {
		Value::Bool(*self)
	}
}

impl FromValue for DateTime<Utc> {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::DateTime(dt) => Ok(dt),
			other => Err(ValueError::unexpected("date-time", &other)),
		}
	}
}

impl IntoValue for DateTime<Utc> {
	fn to_value(&self) -> Value {
		Value::DateTime(*self)
	}
}

impl FromValue for serde_json::Value {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Mixed(json) => Ok(json),
			Value::Null => Ok(Self::Null),
			other => Err(ValueError::unexpected("any value", &other)),
		}
	}
}

impl IntoValue for serde_json::Value {
	fn to_value(&self) -> Value {
		Value::Mixed(self.clone())
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::List(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(ValueError::unexpected("array", &other)),
		}
	}
}

impl<T: IntoValue> IntoValue for Vec<T> {
	fn to_value(&self) -> Value {
		Value::List(self.iter().map(IntoValue::to_value).collect())
	}
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Map(entries) => entries
				.into_iter()
				.map(|(key, value)| T::from_value(value).map(|value| (key, value)))
				.collect(),
			other => Err(ValueError::unexpected("map", &other)),
		}
	}
}

impl<T: IntoValue> IntoValue for BTreeMap<String, T> {
	fn to_value(&self) -> Value {
		Value::Map(
			self.iter()
				.map(|(key, value)| (key.clone(), value.to_value()))
				.collect(),
		)
	}
}

impl<T: FromValue> FromValue for Box<T> {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		T::from_value(value).map(Self::new)
	}
}

impl<T: IntoValue> IntoValue for Box<T> {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

/// The set fields of one model instance, keyed by local name.
///
/// Unset fields have no entry. Nullable fields that are explicitly `null`
/// hold [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	type_name: &'static str,
	values: BTreeMap<&'static str, Value>,
}

impl Record {
	/// An empty record for the model called `type_name`.
	#[must_use]
	pub const fn new(type_name: &'static str) -> Self {
		Self {
			type_name,
			values: BTreeMap::new(),
		}
	}

	/// The name of the model this record belongs to.
	#[must_use]
	pub const fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Set `name` to `value`, replacing any previous value.
	pub fn insert(&mut self, name: &'static str, value: Value) {
		self.values.insert(name, value);
	}

	/// The value of `name`, if set.
	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// Whether `name` is set.
	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Number of set fields.
	#[must_use]
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether no field is set.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterate the set fields in local-name order.
	pub fn iter(&self) -> btree_map::Iter<'_, &'static str, Value> {
		self.values.iter()
	}

	/// Take a field that must be set.
	///
	/// # Errors
	///
	/// Returns an error if the field is unset or has the wrong shape.
	pub fn required<T: FromValue>(&mut self, name: &'static str) -> Result<T, Error> {
		match self.values.remove(name) {
			Some(value) => self.convert(name, value),
			None => Err(Error::MissingRequiredField {
				type_name: self.type_name,
				field: name.to_string(),
			}),
		}
	}

	/// Take a field that may be unset. A stored `null` reads as unset.
	///
	/// # Errors
	///
	/// Returns an error if the field has the wrong shape.
	pub fn optional<T: FromValue>(&mut self, name: &'static str) -> Result<Option<T>, Error> {
		match self.values.remove(name) {
			None | Some(Value::Null) => Ok(None),
			Some(value) => self.convert(name, value).map(Some),
		}
	}

	/// Take a field that may be unset or explicitly `null`.
	///
	/// # Errors
	///
	/// Returns an error if the field has the wrong shape.
	pub fn nullable<T: FromValue>(&mut self, name: &'static str) -> Result<Nullable<T>, Error> {
		match self.values.remove(name) {
			None => Ok(Nullable::Unset),
			Some(Value::Null) => Ok(Nullable::Null),
			Some(value) => self.convert(name, value).map(Nullable::Value),
		}
	}

	/// Store a set value.
	pub fn put<T: IntoValue>(&mut self, name: &'static str, value: &T) {
		self.values.insert(name, value.to_value());
	}

	/// Store a value that may be unset.
	pub fn put_optional<T: IntoValue>(&mut self, name: &'static str, value: Option<&T>) {
		if let Some(value) = value {
			self.put(name, value);
		}
	}

	/// Store a value that may be unset or explicitly `null`.
	pub fn put_nullable<T: IntoValue>(&mut self, name: &'static str, value: &Nullable<T>) {
		match value {
			Nullable::Unset => {},
			Nullable::Null => self.insert(name, Value::Null),
			Nullable::Value(value) => self.put(name, value),
		}
	}

	fn convert<T: FromValue>(&self, name: &'static str, value: Value) -> Result<T, Error> {
		T::from_value(value).map_err(|e| match e {
			ValueError::Unexpected { expected, found } => Error::TypeMismatch {
				type_name: self.type_name,
				field: name.to_string(),
				expected: expected.to_string(),
				found,
			},
			ValueError::Nested(inner) => *inner,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nullable_keeps_null_and_unset_apart() {
		let mut record = Record::new("Probe");
		record.put_nullable::<String>("gone", &Nullable::Null);
		record.put_nullable::<String>("never", &Nullable::Unset);
		record.put_nullable("set", &Nullable::Value("x".to_string()));

		assert_eq!(record.len(), 2);
		assert_eq!(record.get("gone"), Some(&Value::Null));
		assert!(!record.contains("never"));

		assert_eq!(record.nullable::<String>("gone").unwrap(), Nullable::Null);
		assert_eq!(record.nullable::<String>("never").unwrap(), Nullable::Unset);
		assert_eq!(
			record.nullable::<String>("set").unwrap().value().map(String::as_str),
			Some("x")
		);
	}

	#[test]
	fn optional_reads_null_as_unset() {
		let mut record = Record::new("Probe");
		record.insert("name", Value::Null);

		assert_eq!(record.optional::<String>("name").unwrap(), None);
	}

	#[test]
	fn required_reports_missing_field() {
		let mut record = Record::new("Probe");
		let err = record.required::<String>("name").unwrap_err();

		assert!(matches!(
			err,
			Error::MissingRequiredField { type_name: "Probe", ref field } if field == "name"
		));
	}

	#[test]
	fn wrong_shape_is_a_type_mismatch() {
		let mut record = Record::new("Probe");
		record.insert("count", Value::String("3".into()));

		let err = record.required::<i64>("count").unwrap_err();
		assert!(matches!(
			err,
			Error::TypeMismatch { found: "string", ref expected, .. } if expected == "integer"
		));
	}

	#[test]
	fn value_errors_describe_the_mismatch() {
		let err = String::from_value(Value::Int(7)).unwrap_err();
		assert_eq!(err.to_string(), "expected string, found integer");

		let nested = ValueError::Nested(Box::new(Error::MissingRequiredField {
			type_name: "Person",
			field: "first_name".to_string(),
		}));
		assert_eq!(nested.to_string(), "Person: missing required field `first_name`");
	}

	#[test]
	fn floats_accept_integers() {
		assert!((f64::from_value(Value::Int(3)).unwrap() - 3.0).abs() < f64::EPSILON);
		assert!(i64::from_value(Value::Float(3.0)).is_err());
	}

	#[test]
	fn collections_convert_elementwise() {
		let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
		assert_eq!(Vec::<i64>::from_value(list).unwrap(), vec![1, 2]);

		let mixed = Value::List(vec![Value::Int(1), Value::Bool(true)]);
		assert!(Vec::<i64>::from_value(mixed).is_err());

		let map: BTreeMap<String, bool> = BTreeMap::from([("a".to_string(), true)]);
		assert_eq!(
			BTreeMap::<String, bool>::from_value(map.to_value()).unwrap(),
			map
		);
	}
}
