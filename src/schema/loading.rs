use super::{
	Array, Enum, Fixed, LoadError, LoadErrorKind, Map, Name, PathSegment, Record, RecordField,
	SchemaKey, SchemaNode, Symbol, SymbolTable, Union,
};

use {
	serde_json::{Map as JsonObject, Value as Json},
	std::sync::Arc,
};

/// Nodes and symbols staged by a successful load, to be committed into the
/// registry
pub(crate) struct Loaded {
	pub(crate) nodes: Vec<SchemaNode>,
	pub(crate) symbols: SymbolTable,
	pub(crate) root: SchemaKey,
}

/// Walk `schema`, staging every node and named type it defines
///
/// Nothing is written to the committed `symbols`, so a failed load leaves no
/// trace.
pub(crate) fn load(
	committed_nodes: usize,
	committed_symbols: &SymbolTable,
	schema: &Json,
	namespace: Option<&str>,
) -> Result<Loaded, LoadError> {
	let mut state = SchemaConstructionState {
		committed_nodes,
		committed_symbols,
		nodes: Vec::new(),
		symbols: SymbolTable::default(),
	};
	let root = state.register_node(schema, namespace.filter(|ns| !ns.is_empty()))?;
	Ok(Loaded {
		nodes: state.nodes,
		symbols: state.symbols,
		root,
	})
}

struct SchemaConstructionState<'r> {
	committed_nodes: usize,
	committed_symbols: &'r SymbolTable,
	nodes: Vec<SchemaNode>,
	symbols: SymbolTable,
}

impl SchemaConstructionState<'_> {
	fn lookup(&self, fully_qualified_name: &str) -> Option<&Symbol> {
		self.symbols
			.get(fully_qualified_name)
			.or_else(|| self.committed_symbols.get(fully_qualified_name))
	}

	fn push(&mut self, node: SchemaNode) -> SchemaKey {
		let key = SchemaKey {
			idx: self.committed_nodes + self.nodes.len(),
		};
		self.nodes.push(node);
		key
	}

	/// Reserve the spot for a node whose children need to know its key
	fn reserve(&mut self) -> SchemaKey {
		self.push(SchemaNode::Null)
	}

	fn fill(&mut self, key: SchemaKey, node: SchemaNode) {
		self.nodes[key.idx - self.committed_nodes] = node;
	}

	fn register_node(
		&mut self,
		schema: &Json,
		namespace: Option<&str>,
	) -> Result<SchemaKey, LoadError> {
		match schema {
			Json::String(type_name) => self.register_type_name(type_name, namespace),
			Json::Array(variants) => {
				if variants.is_empty() {
					return Err(LoadErrorKind::EmptyUnion.into());
				}
				let key = self.reserve();
				let variants = variants
					.iter()
					.enumerate()
					.map(|(idx, variant)| {
						self.register_node(variant, namespace)
							.map_err(|e| e.within(PathSegment::UnionVariant(idx)))
					})
					.collect::<Result<_, _>>()?;
				self.fill(key, SchemaNode::Union(Union { variants }));
				Ok(key)
			}
			Json::Object(object) => self.register_object(schema, object, namespace),
			other => Err(LoadErrorKind::InvalidNode(describe(other)).into()),
		}
	}

	/// A primitive type, or a reference to a named type that must already
	/// be registered
	fn register_type_name(
		&mut self,
		type_name: &str,
		namespace: Option<&str>,
	) -> Result<SchemaKey, LoadError> {
		if type_name == "long" {
			return Err(LoadErrorKind::LongUnsupported.into());
		}
		if let Some(primitive) = SchemaNode::primitive(type_name) {
			return Ok(self.push(primitive.clone()));
		}
		let name = self
			.resolve_reference(type_name, namespace)
			.ok_or_else(|| LoadErrorKind::UnknownReference(type_name.to_owned()))?;
		Ok(self.push(SchemaNode::Reference(name)))
	}

	/// Unqualified references are looked up in the current namespace first,
	/// then in the null namespace
	fn resolve_reference(&self, reference: &str, namespace: Option<&str>) -> Option<Name> {
		let in_namespace = Name::resolve(reference, namespace);
		if self.lookup(in_namespace.fully_qualified_name()).is_some() {
			return Some(in_namespace);
		}
		let bare = Name::from_fully_qualified_name(reference);
		match self.lookup(bare.fully_qualified_name()) {
			Some(_) => Some(bare),
			None => None,
		}
	}

	fn register_object(
		&mut self,
		schema: &Json,
		object: &JsonObject<String, Json>,
		namespace: Option<&str>,
	) -> Result<SchemaKey, LoadError> {
		let type_ = match object.get("type") {
			Some(type_) => type_,
			None => {
				return Err(LoadErrorKind::MissingAttribute {
					type_: "object",
					attribute: "type",
				}
				.into())
			}
		};
		match type_ {
			Json::String(type_name) => match type_name.as_str() {
				"array" => {
					let items = required(object, "array", "items")?;
					let key = self.reserve();
					let items = self
						.register_node(items, namespace)
						.map_err(|e| e.within(PathSegment::Items))?;
					self.fill(key, SchemaNode::Array(Array { items }));
					Ok(key)
				}
				"map" => {
					let values = required(object, "map", "values")?;
					let key = self.reserve();
					let keys = match object.get("keys") {
						Some(keys) => self
							.register_node(keys, namespace)
							.map_err(|e| e.within(PathSegment::Keys))?,
						None => self.push(SchemaNode::String),
					};
					let values = self
						.register_node(values, namespace)
						.map_err(|e| e.within(PathSegment::Values))?;
					self.fill(key, SchemaNode::Map(Map { keys, values }));
					Ok(key)
				}
				"record" => self.register_named("record", schema, object, namespace),
				"enum" => self.register_named("enum", schema, object, namespace),
				"fixed" => self.register_named("fixed", schema, object, namespace),
				_ => self.register_type_name(type_name, namespace),
			},
			Json::Object(_) | Json::Array(_) => {
				// {"type": {"type": "string"}} or {"type": ["null", "string"]}
				// are valid representations as long as nothing else at this
				// level would be ignored
				if ["name", "fields", "symbols", "items", "keys", "values", "size"]
					.iter()
					.any(|attribute| object.contains_key(*attribute))
				{
					return Err(LoadErrorKind::NestedTypeWithProperties.into());
				}
				let namespace = match object.get("namespace") {
					Some(Json::String(namespace)) => Some(namespace.as_str()),
					_ => namespace,
				};
				self.register_node(type_, namespace)
			}
			other => Err(LoadErrorKind::InvalidNode(describe(other)).into()),
		}
	}

	fn register_named(
		&mut self,
		type_: &'static str,
		schema: &Json,
		object: &JsonObject<String, Json>,
		enclosing_namespace: Option<&str>,
	) -> Result<SchemaKey, LoadError> {
		let name = match object.get("name") {
			Some(Json::String(name)) => name.as_str(),
			Some(other) => {
				return Err(LoadErrorKind::InvalidName {
					type_,
					found: describe(other),
				}
				.into())
			}
			None => return Err(LoadErrorKind::MissingName { type_ }.into()),
		};
		let namespace = match object.get("namespace") {
			// An explicit empty namespace is the null namespace
			Some(Json::String(namespace)) => Some(namespace.as_str()),
			Some(_) => {
				return Err(invalid_attribute(type_, "namespace", "expected a string").into())
			}
			None => enclosing_namespace,
		};
		let name = Name::resolve(name, namespace);

		if let Some(existing) = self.lookup(name.fully_qualified_name()) {
			return if existing.definition() == schema {
				// Same definition loaded again: its nodes already exist
				Ok(existing.key())
			} else {
				Err(LoadErrorKind::ConflictingDefinition(name).into())
			};
		}

		let definition = Arc::new(schema.clone());
		let key = self.reserve();
		self.register_symbol(name.clone(), key, &definition)?;
		if let Some(aliases) = object.get("aliases") {
			let aliases = aliases.as_array().ok_or_else(|| {
				invalid_attribute(type_, "aliases", "expected an array of strings")
			})?;
			for alias in aliases {
				let alias = alias.as_str().ok_or_else(|| {
					invalid_attribute(type_, "aliases", "expected an array of strings")
				})?;
				self.register_symbol(Name::resolve(alias, name.namespace()), key, &definition)?;
			}
		}

		let node = match type_ {
			"enum" => {
				let symbols = required(object, type_, "symbols")?
					.as_array()
					.ok_or_else(|| invalid_attribute(type_, "symbols", "expected an array"))?
					.iter()
					.map(|symbol| {
						symbol.as_str().map(str::to_owned).ok_or_else(|| {
							invalid_attribute(type_, "symbols", "expected only strings")
						})
					})
					.collect::<Result<Vec<String>, _>>()?;
				if symbols
					.iter()
					.enumerate()
					.any(|(idx, symbol)| symbols[..idx].contains(symbol))
				{
					return Err(invalid_attribute(type_, "symbols", "symbols must be distinct").into());
				}
				SchemaNode::Enum(Enum { symbols, name })
			}
			"fixed" => {
				let size = required(object, type_, "size")?
					.as_u64()
					.and_then(|size| usize::try_from(size).ok())
					.ok_or_else(|| {
						invalid_attribute(type_, "size", "expected a non-negative integer")
					})?;
				SchemaNode::Fixed(Fixed { size, name })
			}
			_ => {
				let fields = required(object, type_, "fields")?
					.as_array()
					.ok_or_else(|| invalid_attribute(type_, "fields", "expected an array"))?;
				let mut registered_fields: Vec<RecordField> = Vec::with_capacity(fields.len());
				for field in fields {
					let field = self.register_field(field, name.namespace())?;
					if registered_fields.iter().any(|f| f.name == field.name) {
						return Err(LoadError::from(LoadErrorKind::DuplicateFieldName(
							field.name.clone(),
						))
						.within(PathSegment::Field(field.name)));
					}
					registered_fields.push(field);
				}
				SchemaNode::Record(Record {
					fields: registered_fields,
					name,
				})
			}
		};
		self.fill(key, node);
		Ok(key)
	}

	fn register_field(
		&mut self,
		field: &Json,
		namespace: Option<&str>,
	) -> Result<RecordField, LoadError> {
		let field = field
			.as_object()
			.ok_or_else(|| invalid_attribute("record", "fields", "expected an array of objects"))?;
		let name = match field.get("name") {
			Some(Json::String(name)) => name,
			Some(other) => {
				return Err(LoadErrorKind::InvalidName {
					type_: "record field",
					found: describe(other),
				}
				.into())
			}
			None => {
				return Err(LoadErrorKind::MissingName {
					type_: "record field",
				}
				.into())
			}
		};
		let type_ = field
			.get("type")
			.ok_or(LoadErrorKind::MissingAttribute {
				type_: "record field",
				attribute: "type",
			})
			.map_err(|e| LoadError::from(e).within(PathSegment::Field(name.clone())))?;
		Ok(RecordField {
			type_: self
				.register_node(type_, namespace)
				.map_err(|e| e.within(PathSegment::Field(name.clone())))?,
			name: name.clone(),
			default: field.get("default").cloned(),
		})
	}

	fn register_symbol(
		&mut self,
		name: Name,
		key: SchemaKey,
		definition: &Arc<serde_json::Value>,
	) -> Result<(), LoadError> {
		if let Some(existing) = self.lookup(name.fully_qualified_name()) {
			return if Arc::ptr_eq(existing.shared_definition(), definition)
				|| existing.definition() == &**definition
			{
				Ok(())
			} else {
				Err(LoadErrorKind::ConflictingDefinition(name).into())
			};
		}
		tracing::trace!(name = name.fully_qualified_name(), ?key, "registering named type");
		self.symbols.insert(
			name.fully_qualified_name().to_owned(),
			Symbol::new(key, Arc::clone(definition)),
		);
		Ok(())
	}
}

fn required<'j>(
	object: &'j JsonObject<String, Json>,
	type_: &'static str,
	attribute: &'static str,
) -> Result<&'j Json, LoadErrorKind> {
	object
		.get(attribute)
		.ok_or(LoadErrorKind::MissingAttribute { type_, attribute })
}

fn invalid_attribute(
	type_: &'static str,
	attribute: &'static str,
	reason: &'static str,
) -> LoadErrorKind {
	LoadErrorKind::InvalidAttribute {
		type_,
		attribute,
		reason,
	}
}

fn describe(value: &Json) -> String {
	match value {
		Json::Null => "null".to_owned(),
		Json::Bool(b) => format!("boolean {b}"),
		Json::Number(n) => format!("number {n}"),
		Json::String(s) => format!("string {s:?}"),
		Json::Array(_) => "an array".to_owned(),
		Json::Object(_) => "an object".to_owned(),
	}
}
