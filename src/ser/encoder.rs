use super::*;

use crate::{
	schema::{Array, Enum, Fixed, Map, Name, Record, SchemaKey, SchemaNode, Union},
	SchemaRegistry, Value,
};

use num_traits::ToPrimitive;

/// Fields that are absent from a record value are encoded as this
static ABSENT: Value = Value::Null;

/// Walks a [`Value`] along a [`SchemaNode`], writing the binary encoding
///
/// Returns an error as soon as the value doesn't match the schema, in which
/// case whatever has been written to the writer should be discarded.
pub(crate) struct DatumEncoder<'s, 'w> {
	pub(super) registry: &'s SchemaRegistry,
	pub(super) writer: &'w mut BinaryWriter,
}

impl<'s, 'w> DatumEncoder<'s, 'w> {
	pub(crate) fn new(registry: &'s SchemaRegistry, writer: &'w mut BinaryWriter) -> Self {
		Self { registry, writer }
	}

	pub(crate) fn encode(&mut self, value: &Value, node: &'s SchemaNode) -> Result<(), EncodeError> {
		match *node {
			SchemaNode::Null => Ok(()),
			SchemaNode::Boolean => match *value {
				Value::Boolean(b) => {
					self.writer.write_bool(b);
					Ok(())
				}
				_ => Err(mismatch(value, "boolean")),
			},
			SchemaNode::Int => {
				let int = match *value {
					Value::Int(i) => i32::try_from(i).ok(),
					// Range is checked before truncating towards zero
					Value::Float(f) if (i32::MIN as f64..=i32::MAX as f64).contains(&f) => {
						f.to_i32()
					}
					Value::Float(_) => None,
					_ => return Err(mismatch(value, "int")),
				};
				match int {
					Some(int) => {
						self.writer.write_int(int);
						Ok(())
					}
					None => Err(EncodeError::msg(format_args!(
						"{value:?} does not fit in an int (32-bit signed integer)"
					))),
				}
			}
			SchemaNode::Float => match value.as_f64() {
				Some(f) => {
					self.writer.write_float(f as f32);
					Ok(())
				}
				None => Err(mismatch(value, "float")),
			},
			SchemaNode::Double => match value.as_f64() {
				Some(f) => {
					self.writer.write_double(f);
					Ok(())
				}
				None => Err(mismatch(value, "double")),
			},
			SchemaNode::String => match value {
				Value::String(s) => {
					self.encode_str(s);
					Ok(())
				}
				_ => Err(mismatch(value, "string")),
			},
			SchemaNode::Bytes => {
				let bytes = match value {
					Value::String(s) => std::borrow::Cow::Borrowed(s.as_bytes()),
					_ => value
						.as_byte_sequence()
						.ok_or_else(|| mismatch(value, "bytes"))?,
				};
				match self.registry.config().string_encoding() {
					// Type-checked only
					StringEncoding::Unprefixed => {}
					StringEncoding::LengthPrefixed => self.writer.write_length_delimited(&bytes),
				}
				Ok(())
			}
			SchemaNode::Array(Array { items }) => match value {
				Value::Array(values) => {
					let items = self.registry.node(items);
					self.encode_block(values.len(), values, |encoder, item| {
						encoder.encode(item, items)
					})
				}
				_ => Err(mismatch(value, "array")),
			},
			SchemaNode::Map(Map { keys, values }) => match value {
				Value::Map(entries) => {
					let keys = self.registry.node(keys);
					let values = self.registry.node(values);
					self.encode_block(entries.len(), entries, |encoder, (key, value)| {
						encoder.encode_map_key(key, keys)?;
						encoder.encode(value, values)
					})
				}
				_ => Err(mismatch(value, "map")),
			},
			SchemaNode::Enum(Enum {
				ref symbols,
				ref name,
			}) => {
				let idx = match value {
					Value::String(symbol) => symbols.iter().position(|s| s == symbol),
					Value::Int(idx) => usize::try_from(*idx).ok(),
					Value::Float(idx) => idx.to_usize(),
					_ => return Err(mismatch(value, name.fully_qualified_name())),
				};
				match idx
					.filter(|&idx| idx < symbols.len())
					.and_then(|idx| i32::try_from(idx).ok())
				{
					Some(idx) => {
						self.writer.write_int(idx);
						Ok(())
					}
					None => Err(EncodeError::msg(format_args!(
						"{value:?} is not a symbol of enum {name}"
					))),
				}
			}
			SchemaNode::Record(Record {
				ref fields,
				ref name,
			}) => {
				if !matches!(value, Value::Map(_)) {
					return Err(mismatch(value, name.fully_qualified_name()));
				}
				for field in fields {
					let field_value = value.get(&field.name).unwrap_or(&ABSENT);
					let field_node = self.registry.node(field.type_);
					self.encode(field_value, field_node).map_err(|e| {
						EncodeError::msg(format_args!(
							"Could not encode field {} of record {name}: {e}",
							field.name
						))
					})?;
				}
				Ok(())
			}
			SchemaNode::Fixed(Fixed { size, ref name }) => {
				let bytes = match value {
					Value::String(s) => std::borrow::Cow::Borrowed(s.as_bytes()),
					_ => value
						.as_byte_sequence()
						.ok_or_else(|| mismatch(value, name.fully_qualified_name()))?,
				};
				if bytes.len() != size {
					return Err(EncodeError::msg(format_args!(
						"Fixed {name} has size {size}, but got {} bytes",
						bytes.len()
					)));
				}
				self.writer.write_bytes(&bytes);
				Ok(())
			}
			SchemaNode::Union(Union { ref variants }) => self.encode_union(value, variants),
			SchemaNode::Reference(ref name) => {
				let node = self.resolve(name)?;
				self.encode(value, node)
			}
		}
	}

	fn encode_union(&mut self, value: &Value, variants: &[SchemaKey]) -> Result<(), EncodeError> {
		let registry = self.registry;
		let variant_nodes = variants.iter().map(|&key| registry.node(key));

		if value.is_null() {
			return match variant_nodes
				.clone()
				.position(|node| matches!(node, SchemaNode::Null))
			{
				Some(idx) => self.write_union_discriminant(idx),
				None => Err(EncodeError::new(
					"Could not encode null: union has no null alternative",
				)),
			};
		}

		if registry.config().uses_short_unions() {
			if let &[first, second] = variants {
				match (registry.node(first), registry.node(second)) {
					(SchemaNode::Null, present) => {
						self.writer.write_int(1);
						return self.encode(value, present);
					}
					(present, SchemaNode::Null) => {
						self.writer.write_int(0);
						return self.encode(value, present);
					}
					_ => {}
				}
			}
		}

		// Wrapper form: {"<type name>": value}
		let (type_name, inner_value) = match value {
			Value::Map(entries) if entries.len() == 1 => (&entries[0].0, &entries[0].1),
			_ => {
				return Err(EncodeError::msg(format_args!(
					"Could not encode {} as union: expected a single-key map \
						naming the union alternative",
					value.kind()
				)))
			}
		};
		// The fully qualified name is preferred over the unqualified one
		let (idx, node) = variant_nodes
			.clone()
			.enumerate()
			.find(|(_, node)| node.type_name() == Some(type_name.as_str()))
			.or_else(|| {
				variant_nodes
					.enumerate()
					.find(|(_, node)| node.name().map(Name::name) == Some(type_name.as_str()))
			})
			.ok_or_else(|| {
				EncodeError::msg(format_args!("Union has no alternative named {type_name:?}"))
			})?;
		self.write_union_discriminant(idx)?;
		self.encode(inner_value, node)
	}

	fn write_union_discriminant(&mut self, idx: usize) -> Result<(), EncodeError> {
		let idx: i32 = idx
			.try_into()
			.map_err(|_| EncodeError::new("Union discriminant overflows i32"))?;
		self.writer.write_int(idx);
		Ok(())
	}

	fn encode_map_key(&mut self, key: &str, keys: &'s SchemaNode) -> Result<(), EncodeError> {
		match *keys {
			SchemaNode::String => {
				self.encode_str(key);
				Ok(())
			}
			_ => self.encode(&Value::String(key.to_owned()), keys),
		}
	}

	fn encode_str(&mut self, s: &str) {
		match self.registry.config().string_encoding() {
			StringEncoding::Unprefixed => self.writer.write_string(s),
			StringEncoding::LengthPrefixed => self.writer.write_length_delimited(s.as_bytes()),
		}
	}

	fn resolve(&self, name: &Name) -> Result<&'s SchemaNode, EncodeError> {
		self.registry.resolve(name).ok_or_else(|| {
			EncodeError::msg(format_args!("Schema references unknown named type {name}"))
		})
	}
}

fn mismatch(value: &Value, expected: &str) -> EncodeError {
	EncodeError::msg(format_args!(
		"Could not encode {} as {expected}",
		value.kind()
	))
}
