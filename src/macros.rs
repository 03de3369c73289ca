/// Declare a model: the struct, its schema and its record conversions, all
/// from one field table.
///
/// Each field line reads `mode name: Type [= "wire_name"] => kind`, where
/// `mode` is `required`, `optional` or `nullable`. Optional fields become
/// `Option<Type>`, nullable ones [`Nullable<Type>`](crate::value::Nullable).
macro_rules! model {
	(@ty required $ty:ty) => { $ty };
	(@ty optional $ty:ty) => { Option<$ty> };
	(@ty nullable $ty:ty) => { $crate::value::Nullable<$ty> };

	(@wire $field:ident) => { stringify!($field) };
	(@wire $field:ident $wire:literal) => { $wire };

	(@put required $record:ident, $name:expr, $value:expr) => { $record.put($name, $value) };
	(@put optional $record:ident, $name:expr, $value:expr) => {
		$record.put_optional($name, Option::as_ref($value))
	};
	(@put nullable $record:ident, $name:expr, $value:expr) => {
		$record.put_nullable($name, $value)
	};

	(
		$(#[$meta:meta])*
		pub struct $name:ident {
			$(
				$(#[$field_meta:meta])*
				$mode:ident $field:ident : $ty:ty $(= $wire:literal)? => $kind:expr
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Default)]
		pub struct $name {
			$(
				$(#[$field_meta])*
				pub $field: model!(@ty $mode $ty),
			)*
		}

		impl $crate::mapper::Model for $name {
			const NAME: &'static str = stringify!($name);

			fn schema() -> $crate::schema::Schema {
				$crate::schema::Schema::builder(Self::NAME)
					$( .$mode(stringify!($field), model!(@wire $field $($wire)?), $kind) )*
					.build()
			}

			fn from_record(
				mut record: $crate::value::Record,
			) -> Result<Self, $crate::mapper::Error> {
				Ok(Self {
					$( $field: record.$mode(stringify!($field))?, )*
				})
			}

			fn to_record(&self) -> $crate::value::Record {
				let mut record = $crate::value::Record::new(Self::NAME);
				$( model!(@put $mode record, stringify!($field), &self.$field); )*
				record
			}
		}

		impl $crate::value::FromValue for $name {
			fn from_value(value: $crate::value::Value) -> Result<Self, $crate::value::ValueError> {
				match value {
					$crate::value::Value::Record(record) => {
						<Self as $crate::mapper::Model>::from_record(record)
							.map_err(|e| $crate::value::ValueError::Nested(Box::new(e)))
					},
					other => Err($crate::value::ValueError::Unexpected {
						expected: "object",
						found: other.kind_name(),
					}),
				}
			}
		}

		impl $crate::value::IntoValue for $name {
			fn to_value(&self) -> $crate::value::Value {
				$crate::value::Value::Record(<Self as $crate::mapper::Model>::to_record(self))
			}
		}

		impl $crate::mapper::FromWire for $name {
			fn from_wire(wire: &::serde_json::Value) -> Result<Self, $crate::mapper::Error> {
				$crate::mapper::decode(wire)
			}
		}
	};
}

/// Declare an open string enum: a newtype over the raw wire string with
/// the known values as associated constants.
///
/// Decoding never rejects an unknown value; use `is_known` to check.
macro_rules! string_enum {
	(
		$(#[$meta:meta])*
		pub struct $name:ident {
			$(
				$(#[$constant_meta:meta])*
				$constant:ident = $value:literal
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
		pub struct $name(std::borrow::Cow<'static, str>);

		impl $name {
			$(
				$(#[$constant_meta])*
				pub const $constant: Self = Self(std::borrow::Cow::Borrowed($value));
			)*

			/// Every value this version of the crate knows about.
			pub const KNOWN: &'static [&'static str] = &[$($value),*];

			/// Wrap a raw wire value.
			#[must_use]
			pub fn new(value: impl Into<String>) -> Self {
				Self(std::borrow::Cow::Owned(value.into()))
			}

			/// The raw wire value.
			#[must_use]
			pub fn as_str(&self) -> &str {
				&self.0
			}

			/// Whether the value is one of [`Self::KNOWN`].
			#[must_use]
			pub fn is_known(&self) -> bool {
				Self::KNOWN.contains(&self.as_str())
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self::new(value)
			}
		}

		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self::new(value)
			}
		}

		impl $crate::value::FromValue for $name {
			fn from_value(value: $crate::value::Value) -> Result<Self, $crate::value::ValueError> {
				match value {
					$crate::value::Value::String(raw) => Ok(Self::new(raw)),
					other => Err($crate::value::ValueError::Unexpected {
						expected: "enum string",
						found: other.kind_name(),
					}),
				}
			}
		}

		impl $crate::value::IntoValue for $name {
			fn to_value(&self) -> $crate::value::Value {
				$crate::value::Value::String(self.0.to_string())
			}
		}
	};
}
