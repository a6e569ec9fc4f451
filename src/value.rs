//! The dynamic values that get validated and encoded against a schema

use serde::de::*;

/// A dynamically-typed value, as validated and encoded by a
/// [`SchemaRegistry`](crate::SchemaRegistry)
///
/// Records, maps and the wrapper form of union values
/// (`{"<type name>": value}`) are all represented as [`Value::Map`].
///
/// JSON documents convert naturally:
/// ```
/// use avro_lite::Value;
///
/// let value: Value = serde_json::json!({"a": [1, 2.5, null]}).into();
/// assert_eq!(
/// 	value,
/// 	Value::Map(vec![(
/// 		"a".to_owned(),
/// 		Value::Array(vec![Value::Int(1), Value::Float(2.5), Value::Null])
/// 	)])
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// The absent value
	Null,
	Boolean(bool),
	/// Any integral number
	Int(i64),
	/// Any non-integral number (or one that doesn't fit an `i64`)
	Float(f64),
	String(String),
	/// Raw bytes
	Bytes(Vec<u8>),
	Array(Vec<Value>),
	/// Key/value pairs, in their natural enumeration (insertion) order
	Map(Vec<(String, Value)>),
}

impl Value {
	/// Look up the value under `key` if this is a [`Value::Map`]
	///
	/// If a key appears several times, the first occurrence wins.
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub(crate) fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Boolean(_) => "boolean",
			Value::Int(_) => "integer",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::Bytes(_) => "bytes",
			Value::Array(_) => "array",
			Value::Map(_) => "map",
		}
	}

	/// Any number, as `f64`
	pub(crate) fn as_f64(&self) -> Option<f64> {
		match *self {
			Value::Int(i) => Some(i as f64),
			Value::Float(f) => Some(f),
			_ => None,
		}
	}

	/// Raw bytes, or an array whose items are all integers in `0..=255`
	pub(crate) fn as_byte_sequence(&self) -> Option<std::borrow::Cow<'_, [u8]>> {
		match self {
			Value::Bytes(bytes) => Some(std::borrow::Cow::Borrowed(bytes)),
			Value::Array(items) => items
				.iter()
				.map(|item| match *item {
					Value::Int(i) => u8::try_from(i).ok(),
					_ => None,
				})
				.collect::<Option<Vec<u8>>>()
				.map(std::borrow::Cow::Owned),
			_ => None,
		}
	}
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Boolean(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => Value::Int(i),
				// u64 above i64::MAX or non-integral
				None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
			},
			serde_json::Value::String(s) => Value::String(s),
			serde_json::Value::Array(items) => {
				Value::Array(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(entries) => Value::Map(
				entries
					.into_iter()
					.map(|(k, v)| (k, Value::from(v)))
					.collect(),
			),
		}
	}
}

macro_rules! impl_from_integer {
	($($t: ty)*) => {
		$(
			impl From<$t> for Value {
				fn from(v: $t) -> Self {
					Value::Int(v.into())
				}
			}
		)*
	};
}
impl_from_integer! { i8 i16 i32 i64 u8 u16 u32 }

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}
impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Value::Float(v.into())
	}
}
impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}
impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_owned())
	}
}
impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}
impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(v)
	}
}
impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Value::Null, Into::into)
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct ValueVisitor;
		impl<'de> Visitor<'de> for ValueVisitor {
			type Value = Value;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(formatter, "any value")
			}

			fn visit_unit<E>(self) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::Null)
			}

			fn visit_none<E>(self) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::Null)
			}

			fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
			where
				D: Deserializer<'de>,
			{
				Deserialize::deserialize(deserializer)
			}

			fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::Boolean(v))
			}

			fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::Int(v))
			}

			fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(match i64::try_from(v) {
					Ok(v) => Value::Int(v),
					Err(_) => Value::Float(v as f64),
				})
			}

			fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::Float(v))
			}

			fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::String(v.to_owned()))
			}

			fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::String(v))
			}

			fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::Bytes(v.to_owned()))
			}

			fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(Value::Bytes(v))
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
			where
				A: SeqAccess<'de>,
			{
				let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
				while let Some(item) = seq.next_element()? {
					items.push(item);
				}
				Ok(Value::Array(items))
			}

			fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
				while let Some(entry) = map.next_entry::<String, Value>()? {
					entries.push(entry);
				}
				Ok(Value::Map(entries))
			}
		}
		deserializer.deserialize_any(ValueVisitor)
	}
}
