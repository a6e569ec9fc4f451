use crate::{
	schema::{self, LoadError, LoadErrorKind, Name, SchemaKey, SchemaNode, SymbolTable},
	ser::{BinaryWriter, DatumEncoder, EncodeError, EncoderConfig},
	validate::Validator,
	Value,
};

/// Holds every schema loaded so far, and validates or encodes values against
/// them
///
/// Loading is additive: named types registered by a `load` stay available to
/// all subsequent loads, validations and encodings. Schemas are looked up
/// either by fully qualified name (or primitive type name), or, if no name is
/// given, as the schema of the last successful load.
///
/// Loading requires `&mut self` while validating and encoding only require
/// `&self`, so a registry may be shared for encoding across threads once all
/// schemas are loaded.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
	nodes: Vec<SchemaNode>,
	symbols: SymbolTable,
	last_loaded: Option<SchemaKey>,
	config: EncoderConfig,
}

/// A schema was requested that the [`SchemaRegistry`] doesn't know about
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UnknownSchema {
	#[error("Unknown schema: {0:?}")]
	Name(String),
	#[error("No schema name was provided and no schema has been loaded yet")]
	NothingLoaded,
}

impl SchemaRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: EncoderConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	/// Load a schema, registering the named types it defines
	///
	/// On failure nothing is registered, and the last loaded schema is
	/// unchanged.
	pub fn load(&mut self, schema: &serde_json::Value) -> Result<(), LoadError> {
		self.load_with_namespace(schema, None)
	}

	/// Load a schema, resolving unqualified names that aren't in an explicit
	/// `namespace` against `namespace`
	pub fn load_with_namespace(
		&mut self,
		schema: &serde_json::Value,
		namespace: Option<&str>,
	) -> Result<(), LoadError> {
		let loaded = schema::load(self.nodes.len(), &self.symbols, schema, namespace)
			.map_err(|error| {
				tracing::debug!(%error, "failed to load schema");
				error
			})?;
		tracing::debug!(
			nodes = loaded.nodes.len(),
			named_types = loaded.symbols.len(),
			"loaded schema"
		);
		self.nodes.extend(loaded.nodes);
		self.symbols.extend(loaded.symbols);
		self.last_loaded = Some(loaded.root);
		Ok(())
	}

	/// Parse `schema` as JSON, then [`load`](Self::load) it
	pub fn load_str(&mut self, schema: &str) -> Result<(), LoadError> {
		let schema: serde_json::Value =
			serde_json::from_str(schema).map_err(|e| LoadError::from(LoadErrorKind::Json(e)))?;
		self.load(&schema)
	}

	/// Whether `value` matches the schema `name` (or the last loaded schema)
	pub fn validate(&self, value: &Value, name: Option<&str>) -> Result<bool, UnknownSchema> {
		let node = self.schema(name)?;
		Ok(Validator::new(self).validate(value, node))
	}

	/// Encode `value` as the schema `name` (or the last loaded schema)
	///
	/// ```
	/// let mut registry = avro_lite::SchemaRegistry::new();
	/// registry
	/// 	.load(&serde_json::json!({"type": "array", "items": "int"}))
	/// 	.expect("Failed to load schema");
	/// assert_eq!(
	/// 	registry
	/// 		.encode(&serde_json::json!([1, 2, 3]).into(), None)
	/// 		.expect("Failed to encode"),
	/// 	[6, 2, 4, 6, 0]
	/// );
	/// ```
	pub fn encode(&self, value: &Value, name: Option<&str>) -> Result<Vec<u8>, EncodeError> {
		let mut writer = BinaryWriter::new();
		self.encode_into(value, name, &mut writer)?;
		Ok(writer.into_inner())
	}

	/// Encode `value`, appending to `writer`
	///
	/// If encoding fails, `writer` is restored to what it held before the
	/// call.
	pub fn encode_into(
		&self,
		value: &Value,
		name: Option<&str>,
		writer: &mut BinaryWriter,
	) -> Result<(), EncodeError> {
		let node = self.schema(name)?;
		let start = writer.len();
		let result = DatumEncoder::new(self, writer).encode(value, node);
		if let Err(ref error) = result {
			tracing::debug!(%error, schema = node.type_name(), "failed to encode value");
			writer.truncate(start);
		}
		result
	}

	/// The schema registered under `name`, which may also be a primitive type
	/// name
	pub fn get(&self, name: &str) -> Option<&SchemaNode> {
		self.schema(Some(name)).ok()
	}

	/// Whether a named type is registered under this fully qualified name
	pub fn contains(&self, name: &str) -> bool {
		self.symbols.contains(name)
	}

	/// All the registered fully qualified names (aliases included)
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.symbols.names()
	}

	pub fn symbols(&self) -> &SymbolTable {
		&self.symbols
	}

	/// The schema of the last successful load
	pub fn last_loaded(&self) -> Option<&SchemaNode> {
		self.last_loaded.map(|key| self.node(key))
	}

	pub fn config(&self) -> &EncoderConfig {
		&self.config
	}

	pub fn config_mut(&mut self) -> &mut EncoderConfig {
		&mut self.config
	}

	/// Nodes are only ever appended, so keys handed out by this registry are
	/// always in bounds.
	pub(crate) fn node(&self, key: SchemaKey) -> &SchemaNode {
		&self.nodes[key.idx]
	}

	pub(crate) fn resolve(&self, name: &Name) -> Option<&SchemaNode> {
		self.symbols
			.get(name.fully_qualified_name())
			.map(|symbol| self.node(symbol.key()))
	}

	fn schema(&self, name: Option<&str>) -> Result<&SchemaNode, UnknownSchema> {
		match name {
			None => self.last_loaded().ok_or(UnknownSchema::NothingLoaded),
			Some(name) => SchemaNode::primitive(name)
				.or_else(|| {
					self.symbols
						.get(name)
						.map(|symbol| self.node(symbol.key()))
				})
				.ok_or_else(|| UnknownSchema::Name(name.to_owned())),
		}
	}
}
