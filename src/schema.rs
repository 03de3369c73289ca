use once_cell::sync::Lazy;
use std::{
	any::TypeId,
	collections::HashMap,
	fmt::{self, Display},
	sync::{Arc, PoisonError, RwLock},
};

use crate::mapper::Model;

/// Resolves the cached schema of a nested model type.
///
/// Stored as a function pointer rather than the schema itself so that a
/// schema may refer to its own type (or to a type that refers back to it)
/// without recursing while it is being built.
pub type SchemaRef = fn() -> Arc<Schema>;

/// The shape a field's value takes on the wire.
#[derive(Clone)]
pub enum ValueKind {
	/// A JSON string.
	String,
	/// A JSON integer.
	Int,
	/// Any JSON number.
	Float,
	/// A JSON boolean.
	Bool,
	/// A timestamp string.
	DateTime,
	/// A nested object decoded with its own schema.
	Model(SchemaRef),
	/// A string constant from an open set.
	Enum,
	/// A JSON array whose elements share one kind.
	List(Box<ValueKind>),
	/// A JSON object whose values share one kind. Keys are kept verbatim.
	Map(Box<ValueKind>),
	/// Anything at all, passed through untouched.
	Mixed,
}

impl ValueKind {
	/// A list of `element`.
	#[must_use]
	pub fn list(element: Self) -> Self {
		Self::List(Box::new(element))
	}

	/// A string-keyed map of `element`.
	#[must_use]
	pub fn map(element: Self) -> Self {
		Self::Map(Box::new(element))
	}

	/// A nested model of type `T`.
	#[must_use]
	pub fn model<T: Model>() -> Self {
		Self::Model(schema_of::<T>)
	}

	/// The element kind of a list or map.
	#[must_use]
	pub fn element(&self) -> Option<&Self> {
		match self {
			Self::List(element) | Self::Map(element) => Some(element),
			_ => None,
		}
	}
}

impl fmt::Debug for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::String => write!(f, "String"),
			Self::Int => write!(f, "Int"),
			Self::Float => write!(f, "Float"),
			Self::Bool => write!(f, "Bool"),
			Self::DateTime => write!(f, "DateTime"),
			Self::Model(schema) => write!(f, "Model({})", schema().type_name()),
			Self::Enum => write!(f, "Enum"),
			Self::List(element) => write!(f, "List({element:?})"),
			Self::Map(element) => write!(f, "Map({element:?})"),
			Self::Mixed => write!(f, "Mixed"),
		}
	}
}

impl Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::String => write!(f, "string"),
			Self::Int => write!(f, "integer"),
			Self::Float => write!(f, "number"),
			Self::Bool => write!(f, "boolean"),
			Self::DateTime => write!(f, "date-time"),
			Self::Model(_) => write!(f, "object"),
			Self::Enum => write!(f, "enum string"),
			Self::List(_) => write!(f, "array"),
			Self::Map(_) => write!(f, "map"),
			Self::Mixed => write!(f, "any value"),
		}
	}
}

/// One named member of a model.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	local_name: &'static str,
	wire_name: &'static str,
	required: bool,
	nullable: bool,
	kind: ValueKind,
}

impl FieldDescriptor {
	/// The name used in code.
	#[must_use]
	pub const fn local_name(&self) -> &'static str {
		self.local_name
	}

	/// The key used on the wire.
	#[must_use]
	pub const fn wire_name(&self) -> &'static str {
		self.wire_name
	}

	/// Whether the key must be present when decoding.
	#[must_use]
	pub const fn is_required(&self) -> bool {
		self.required
	}

	/// Whether an explicit `null` is a meaningful value for this field.
	#[must_use]
	pub const fn is_nullable(&self) -> bool {
		self.nullable
	}

	/// The shape of the value.
	#[must_use]
	pub const fn kind(&self) -> &ValueKind {
		&self.kind
	}
}

/// The ordered set of field descriptors governing one model type.
#[derive(Debug)]
pub struct Schema {
	type_name: &'static str,
	fields: Vec<FieldDescriptor>,
}

impl Schema {
	/// Start describing the model called `type_name`.
	#[must_use]
	pub const fn builder(type_name: &'static str) -> SchemaBuilder {
		SchemaBuilder {
			type_name,
			fields: Vec::new(),
		}
	}

	/// The name of the described type, used in error messages.
	#[must_use]
	pub const fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Descriptors in declaration order.
	#[must_use]
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Look a descriptor up by its local name.
	#[must_use]
	pub fn field(&self, local_name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.local_name == local_name)
	}
}

/// Declarative construction of a [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
	type_name: &'static str,
	fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
	/// A field that must be present on the wire.
	#[must_use]
	pub fn required(
		self,
		local_name: &'static str,
		wire_name: &'static str,
		kind: ValueKind,
	) -> Self {
		self.field(local_name, wire_name, kind, true, false)
	}

	/// A field that may be omitted on the wire.
	#[must_use]
	pub fn optional(
		self,
		local_name: &'static str,
		wire_name: &'static str,
		kind: ValueKind,
	) -> Self {
		self.field(local_name, wire_name, kind, false, false)
	}

	/// An optional field for which an explicit `null` is distinct from omission.
	#[must_use]
	pub fn nullable(
		self,
		local_name: &'static str,
		wire_name: &'static str,
		kind: ValueKind,
	) -> Self {
		self.field(local_name, wire_name, kind, false, true)
	}

	/// A field with every attribute spelled out. An empty `wire_name` falls
	/// back to `local_name`.
	#[must_use]
	pub fn field(
		mut self,
		local_name: &'static str,
		wire_name: &'static str,
		kind: ValueKind,
		required: bool,
		nullable: bool,
	) -> Self {
		debug_assert!(
			self.fields.iter().all(|f| f.local_name != local_name),
			"duplicate field {local_name} in {}",
			self.type_name
		);

		self.fields.push(FieldDescriptor {
			local_name,
			wire_name: if wire_name.is_empty() { local_name } else { wire_name },
			required,
			nullable,
			kind,
		});
		self
	}

	/// Finish the schema.
	#[must_use]
	pub fn build(self) -> Schema {
		Schema {
			type_name: self.type_name,
			fields: self.fields,
		}
	}
}

static SCHEMAS: Lazy<RwLock<HashMap<TypeId, Arc<Schema>>>> = Lazy::new(RwLock::default);

/// The schema of `T`, built on first use and shared afterwards.
///
/// Two threads racing on the first lookup may both build the schema; only
/// the first insert is kept and both callers receive it.
#[must_use]
pub fn schema_of<T: Model>() -> Arc<Schema> {
	let id = TypeId::of::<T>();

	if let Some(schema) = SCHEMAS
		.read()
		.unwrap_or_else(PoisonError::into_inner)
		.get(&id)
	{
		return Arc::clone(schema);
	}

	let built = Arc::new(T::schema());
	tracing::debug!(
		type_name = T::NAME,
		fields = built.fields().len(),
		"built model schema"
	);

	let mut schemas = SCHEMAS.write().unwrap_or_else(PoisonError::into_inner);
	Arc::clone(schemas.entry(id).or_insert(built))
}
