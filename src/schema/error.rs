use super::Name;

/// Any error that may happen when loading a schema into a
/// [`SchemaRegistry`](crate::SchemaRegistry)
///
/// Holds the location of the offending node, rendered as a path from the
/// root of the loaded schema, e.g. `root.b.values:1` for the second
/// alternative of the union that is the map values of field `b`.
pub struct LoadError {
	inner: Box<ErrorInner>,
}

struct ErrorInner {
	kind: LoadErrorKind,
	/// Collected while unwinding, so innermost segment first
	reversed_path: Vec<PathSegment>,
}

/// The reason why a schema failed to load
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
	#[error("Invalid schema JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error(
		"Expected a type name, an object with a `type` attribute or an array (union), \
			but got {0}"
	)]
	InvalidNode(String),
	#[error("`long` is not supported: 64-bit integers can't be represented losslessly")]
	LongUnsupported,
	#[error("The Schema contains an unknown reference: {0}")]
	UnknownReference(String),
	#[error("Missing name for type {type_}")]
	MissingName { type_: &'static str },
	#[error("Invalid name for type {type_}: expected a string but got {found}")]
	InvalidName { type_: &'static str, found: String },
	#[error("The Schema contains a conflicting definition for {0}")]
	ConflictingDefinition(Name),
	#[error("Record field {0:?} is declared more than once")]
	DuplicateFieldName(String),
	#[error("Missing attribute `{attribute}` on type {type_}")]
	MissingAttribute {
		type_: &'static str,
		attribute: &'static str,
	},
	#[error("Invalid attribute `{attribute}` on type {type_}: {reason}")]
	InvalidAttribute {
		type_: &'static str,
		attribute: &'static str,
		reason: &'static str,
	},
	#[error("Unions must have at least one alternative")]
	EmptyUnion,
	#[error(
		"Got unnecessarily-nested type, but local object properties are set \
			- those would be ignored"
	)]
	NestedTypeWithProperties,
}

/// A step in the path from the root of a schema to one of its nodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
	/// `.name`
	Field(String),
	/// `:idx`
	UnionVariant(usize),
	/// `.items`
	Items,
	/// `.keys`
	Keys,
	/// `.values`
	Values,
}

impl std::fmt::Display for PathSegment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PathSegment::Field(name) => write!(f, ".{name}"),
			PathSegment::UnionVariant(idx) => write!(f, ":{idx}"),
			PathSegment::Items => f.write_str(".items"),
			PathSegment::Keys => f.write_str(".keys"),
			PathSegment::Values => f.write_str(".values"),
		}
	}
}

impl LoadError {
	pub(crate) fn new(kind: LoadErrorKind) -> Self {
		Self {
			inner: Box::new(ErrorInner {
				kind,
				reversed_path: Vec::new(),
			}),
		}
	}

	/// Record that the error happened below `segment`
	///
	/// Called on the way up, so segments are pushed innermost first.
	pub(crate) fn within(mut self, segment: PathSegment) -> Self {
		self.inner.reversed_path.push(segment);
		self
	}

	/// The reason why loading failed
	pub fn kind(&self) -> &LoadErrorKind {
		&self.inner.kind
	}

	/// The path segments from the root to the offending node
	pub fn segments(&self) -> impl Iterator<Item = &PathSegment> + '_ {
		self.inner.reversed_path.iter().rev()
	}

	/// The rendered path to the offending node, e.g. `root.b.values:1`
	pub fn path(&self) -> String {
		let mut path = String::from("root");
		for segment in self.segments() {
			use std::fmt::Write;
			let _ = write!(path, "{segment}");
		}
		path
	}
}

impl From<LoadErrorKind> for LoadError {
	fn from(kind: LoadErrorKind) -> Self {
		Self::new(kind)
	}
}

impl std::fmt::Debug for LoadError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LoadError")
			.field("path", &self.path())
			.field("kind", &self.inner.kind)
			.finish()
	}
}

impl std::fmt::Display for LoadError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Invalid schema at {}: {}", self.path(), self.inner.kind)
	}
}

impl std::error::Error for LoadError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		std::error::Error::source(&self.inner.kind)
	}
}
