use crate::{
	schema::{Array, Enum, Fixed, Map, Record, SchemaNode, Union},
	SchemaRegistry, Value,
};

/// Structural check of a [`Value`] against a [`SchemaNode`]
///
/// Never fails: anything that doesn't match, including a reference to a named
/// type that can't be resolved, is simply `false`.
pub(crate) struct Validator<'s> {
	registry: &'s SchemaRegistry,
}

impl<'s> Validator<'s> {
	pub(crate) fn new(registry: &'s SchemaRegistry) -> Self {
		Self { registry }
	}

	pub(crate) fn validate(&self, value: &Value, node: &SchemaNode) -> bool {
		match *node {
			SchemaNode::Null => value.is_null(),
			SchemaNode::Boolean => matches!(value, Value::Boolean(_)),
			SchemaNode::String => matches!(value, Value::String(_)),
			SchemaNode::Bytes => {
				matches!(value, Value::String(_)) || value.as_byte_sequence().is_some()
			}
			SchemaNode::Int => match *value {
				Value::Int(_) => true,
				Value::Float(f) => f.is_finite() && f.fract() == 0.0,
				_ => false,
			},
			SchemaNode::Float | SchemaNode::Double => value.as_f64().is_some(),
			SchemaNode::Array(Array { items }) => match value {
				Value::Array(values) => {
					let items = self.registry.node(items);
					values.iter().all(|item| self.validate(item, items))
				}
				_ => false,
			},
			// Keys are not checked
			SchemaNode::Map(Map { values, .. }) => match value {
				Value::Map(entries) => {
					let values = self.registry.node(values);
					entries.iter().all(|(_, value)| self.validate(value, values))
				}
				_ => false,
			},
			SchemaNode::Enum(Enum { ref symbols, .. }) => match value {
				Value::String(symbol) => symbols.contains(symbol),
				_ => false,
			},
			SchemaNode::Record(Record { ref fields, .. }) => match value {
				// Fields that are not in the schema are ignored
				Value::Map(_) => fields.iter().all(|field| {
					let field_node = self.registry.node(field.type_);
					match value.get(&field.name) {
						Some(field_value) => self.validate(field_value, field_node),
						None => field.default.is_some() || self.validate(&Value::Null, field_node),
					}
				}),
				_ => false,
			},
			SchemaNode::Fixed(Fixed { size, .. }) => value
				.as_byte_sequence()
				.map_or(false, |bytes| bytes.len() == size),
			SchemaNode::Union(Union { ref variants }) => variants
				.iter()
				.any(|&variant| self.validate(value, self.registry.node(variant))),
			SchemaNode::Reference(ref name) => match self.registry.resolve(name) {
				Some(node) => self.validate(value, node),
				None => false,
			},
		}
	}
}
