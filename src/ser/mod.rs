//! Defines everything necessary for avro binary encoding
//!
//! You typically want to use
//! [`SchemaRegistry::encode`](crate::SchemaRegistry::encode), but the
//! [`BinaryWriter`] may also be used directly to write Avro primitives:
//! ```
//! let mut writer = avro_lite::ser::BinaryWriter::new();
//! writer.write_int(-2);
//! writer.write_bool(true);
//! writer.write_float(1.5);
//! assert_eq!(writer.result(), &[3, 1, 0, 0, 0xc0, 0x3f]);
//! ```

mod blocks;
mod encoder;
mod error;
mod writer;

pub use {error::EncodeError, writer::BinaryWriter};

pub(crate) use encoder::DatumEncoder;

/// Configuration of the encoder of a
/// [`SchemaRegistry`](crate::SchemaRegistry)
///
/// Both settings default to the strict behavior, and may be read from a
/// configuration file:
/// ```
/// # use avro_lite::ser::{EncoderConfig, StringEncoding};
/// let config: EncoderConfig =
/// 	serde_json::from_str(r#"{"short_unions": true}"#).unwrap();
/// assert!(config.uses_short_unions());
/// assert_eq!(config.string_encoding(), StringEncoding::Unprefixed);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
	short_unions: bool,
	string_encoding: StringEncoding,
}

/// How `string` and `bytes` values are framed in the output
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, serde_derive::Serialize, serde_derive::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StringEncoding {
	/// Strings are written as their raw UTF-8 bytes, with no length prefix.
	/// `bytes` values are type-checked but nothing is written for them.
	///
	/// Whoever reads the output needs to know the length of the strings
	/// through some other channel. Empty arrays and maps are written as a
	/// zero count followed by the zero end marker.
	#[default]
	Unprefixed,
	/// Strings and bytes are written as a zig-zag varint length followed by
	/// the raw bytes, as described by the Avro specification. Empty arrays
	/// and maps are written as the end marker alone.
	LengthPrefixed,
}

impl EncoderConfig {
	/// Build a new `EncoderConfig` with the default (strict) options
	pub fn new() -> Self {
		Self::default()
	}

	/// Allow encoding values against a two-branch union where one branch is
	/// `null` without the `{"<type name>": value}` wrapper
	///
	/// With this, for a `["null", "string"]` union, `"foo"` is encoded as
	/// branch `1` followed by the string, where the strict form would require
	/// `{"string": "foo"}`.
	pub fn short_unions(&mut self) -> &mut Self {
		self.short_unions = true;
		self
	}

	/// Write `string` and `bytes` values with a length prefix
	///
	/// See [`StringEncoding::LengthPrefixed`].
	pub fn length_prefixed_strings(&mut self) -> &mut Self {
		self.set_string_encoding(StringEncoding::LengthPrefixed)
	}

	pub fn set_string_encoding(&mut self, string_encoding: StringEncoding) -> &mut Self {
		self.string_encoding = string_encoding;
		self
	}

	pub fn uses_short_unions(&self) -> bool {
		self.short_unions
	}

	pub fn string_encoding(&self) -> StringEncoding {
		self.string_encoding
	}
}
