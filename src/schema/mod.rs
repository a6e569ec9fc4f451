//! Navigate and load the schema nodes held by a
//! [`SchemaRegistry`](crate::SchemaRegistry)

mod error;
mod loading;
mod symbols;

pub use {
	error::{LoadError, LoadErrorKind, PathSegment},
	symbols::{Symbol, SymbolTable},
};

pub(crate) use loading::load;

/// The location of a node in the node arena of a
/// [`SchemaRegistry`](crate::SchemaRegistry)
///
/// Nodes are never removed from a registry once loaded, so a `SchemaKey`
/// obtained from a registry stays valid for the lifetime of that registry.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaKey {
	pub(crate) idx: usize,
}

impl SchemaKey {
	/// Obtain the index in the node arena that this [`SchemaKey`] points to.
	pub const fn idx(self) -> usize {
		self.idx
	}
}

impl std::fmt::Debug for SchemaKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Debug::fmt(&self.idx, f)
	}
}

/// A node of an avro schema, stored in a
/// [`SchemaRegistry`](crate::SchemaRegistry).
///
/// More information about Avro schemas can be found in the
/// [Avro Specification](https://avro.apache.org/docs/current/specification/).
///
/// There is no `Long` variant: 64-bit integers are refused when loading.
#[derive(Clone, Debug)]
pub enum SchemaNode {
	/// A `null` Avro schema.
	Null,
	/// A `boolean` Avro schema.
	Boolean,
	/// An `int` Avro schema.
	Int,
	/// A `float` Avro schema.
	Float,
	/// A `double` Avro schema.
	Double,
	/// A `bytes` Avro schema.
	Bytes,
	/// A `string` Avro schema.
	String,
	/// An `array` Avro schema.
	Array(Array),
	/// A `map` Avro schema.
	Map(Map),
	/// A `union` Avro schema, written as a JSON array of alternatives.
	Union(Union),
	/// A `record` Avro schema.
	Record(Record),
	/// An `enum` Avro schema.
	Enum(Enum),
	/// A `fixed` Avro schema.
	Fixed(Fixed),
	/// A reference to a named type, by fully qualified name
	///
	/// It is resolved through the [`SymbolTable`] whenever a value is
	/// validated or encoded.
	Reference(Name),
}

pub(crate) static NULL: SchemaNode = SchemaNode::Null;
pub(crate) static BOOLEAN: SchemaNode = SchemaNode::Boolean;
pub(crate) static INT: SchemaNode = SchemaNode::Int;
pub(crate) static FLOAT: SchemaNode = SchemaNode::Float;
pub(crate) static DOUBLE: SchemaNode = SchemaNode::Double;
pub(crate) static BYTES: SchemaNode = SchemaNode::Bytes;
pub(crate) static STRING: SchemaNode = SchemaNode::String;

impl SchemaNode {
	/// The node for a primitive type name (`"int"`, `"string"`...)
	///
	/// `"long"` is recognized by the loader but not supported, so it yields
	/// `None` like any other non-primitive name.
	pub fn primitive(type_name: &str) -> Option<&'static SchemaNode> {
		Some(match type_name {
			"null" => &NULL,
			"boolean" => &BOOLEAN,
			"int" => &INT,
			"float" => &FLOAT,
			"double" => &DOUBLE,
			"bytes" => &BYTES,
			"string" => &STRING,
			_ => return None,
		})
	}

	/// The name under which a value for this node is tagged in the wrapper
	/// form of union values (`{"<type name>": value}`)
	///
	/// That is the primitive type name, `array`/`map`, or the fully qualified
	/// name of named types. Unions have no such name.
	pub fn type_name(&self) -> Option<&str> {
		Some(match self {
			SchemaNode::Null => "null",
			SchemaNode::Boolean => "boolean",
			SchemaNode::Int => "int",
			SchemaNode::Float => "float",
			SchemaNode::Double => "double",
			SchemaNode::Bytes => "bytes",
			SchemaNode::String => "string",
			SchemaNode::Array(_) => "array",
			SchemaNode::Map(_) => "map",
			SchemaNode::Union(_) => return None,
			SchemaNode::Record(Record { name, .. })
			| SchemaNode::Enum(Enum { name, .. })
			| SchemaNode::Fixed(Fixed { name, .. })
			| SchemaNode::Reference(name) => name.fully_qualified_name(),
		})
	}

	/// The name of named types (and references to them)
	pub fn name(&self) -> Option<&Name> {
		match self {
			SchemaNode::Record(Record { name, .. })
			| SchemaNode::Enum(Enum { name, .. })
			| SchemaNode::Fixed(Fixed { name, .. })
			| SchemaNode::Reference(name) => Some(name),
			_ => None,
		}
	}
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct Array {
	/// The key of the schema of each item that will be in the array
	pub items: SchemaKey,
}

/// Component of a [`SchemaNode`]
///
/// Unlike standard Avro maps, the schema of the keys is explicit. It defaults
/// to `string` when the schema does not specify `keys`.
#[derive(Clone, Debug)]
pub struct Map {
	/// The key of the schema each map key is encoded with
	pub keys: SchemaKey,
	/// The key of the schema of each value that will be in the map
	pub values: SchemaKey,
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct Union {
	/// The keys of the schemas of each variant that this Avro *union*
	/// supports, in declaration order
	pub variants: Vec<SchemaKey>,
}

/// Component of a [`SchemaNode`]
///
/// An avro `record` is ~equivalent to a Rust struct.
#[derive(Clone, Debug)]
pub struct Record {
	/// The list of fields in this *record* (~= `struct`)
	pub fields: Vec<RecordField>,
	/// The name of the record (including namespace)
	pub name: Name,
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct RecordField {
	/// Name of the field
	pub name: String,
	/// The key of the schema of the type of this field
	pub type_: SchemaKey,
	/// The `default` attribute of the field, as written in the schema
	///
	/// Only its presence matters for validation: a field that declares a
	/// default may be missing from a value.
	pub default: Option<serde_json::Value>,
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct Enum {
	/// All the symbols of the enum, in declaration order
	pub symbols: Vec<String>,
	/// The name of the enum (including namespace)
	pub name: Name,
}

/// Component of a [`SchemaNode`]
#[derive(Clone, Debug)]
pub struct Fixed {
	/// The size in bytes of the *fixed* type
	pub size: usize,
	/// The name of the *fixed* type, including the namespace
	pub name: Name,
}

/// Fully qualified name of a record, enum or fixed
///
/// The namespace is everything before the last `.`, and is computed on
/// access.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name(Box<str>);

impl std::fmt::Debug for Name {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Debug::fmt(&*self.0, f)
	}
}

impl std::fmt::Display for Name {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl Name {
	/// The name without its namespace
	pub fn name(&self) -> &str {
		self.split().1
	}

	pub fn namespace(&self) -> Option<&str> {
		self.split().0
	}

	pub fn fully_qualified_name(&self) -> &str {
		&self.0
	}

	fn split(&self) -> (Option<&str>, &str) {
		match self.0.rsplit_once('.') {
			Some((namespace, name)) => (Some(namespace), name),
			None => (None, &self.0),
		}
	}

	/// `".x"` is `x` in the null namespace
	pub fn from_fully_qualified_name(fully_qualified_name: &str) -> Self {
		Name(
			fully_qualified_name
				.strip_prefix('.')
				.unwrap_or(fully_qualified_name)
				.into(),
		)
	}

	/// Resolve a possibly-unqualified name against a namespace
	///
	/// Names that contain a `.` are already fully qualified and ignore
	/// `namespace`. An empty namespace is the null namespace.
	pub fn resolve(name: &str, namespace: Option<&str>) -> Self {
		match namespace {
			Some(namespace) if !namespace.is_empty() && !name.contains('.') => {
				Name(format!("{namespace}.{name}").into())
			}
			_ => Self::from_fully_qualified_name(name),
		}
	}
}
