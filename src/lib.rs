//! # Getting started
//!
//! ```
//! use avro_lite::{SchemaRegistry, Value};
//!
//! let mut registry = SchemaRegistry::new();
//! registry
//! 	.load_str(
//! 		r#"
//! 		{
//! 			"namespace": "test",
//! 			"type": "record",
//! 			"name": "Test",
//! 			"fields": [
//! 				{ "name": "id", "type": "int" },
//! 				{ "name": "tags", "type": { "type": "array", "items": "int" } },
//! 				{ "name": "note", "type": ["null", "string"], "default": null }
//! 			]
//! 		}
//! 		"#,
//! 	)
//! 	.expect("Failed to load schema");
//!
//! let value: Value = serde_json::json!({"id": -2, "tags": [1]}).into();
//!
//! // Validation is purely structural
//! assert!(registry.validate(&value, Some("test.Test")).expect("Known schema"));
//!
//! // When no name is given, the last loaded schema is used
//! assert_eq!(
//! 	registry.encode(&value, None).expect("Failed to encode"),
//! 	// id, tags (one block of one item, then the end marker), note (null branch)
//! 	[3, 2, 2, 0, 0]
//! );
//! ```
//!
//! # Wire format
//!
//! Ints, union branches, enum indexes and array/map block counts are zig-zag
//! varints. Floats and doubles are little-endian IEEE-754.
//!
//! By default, strings are written as their raw bytes with no length prefix,
//! and `bytes` values are type-checked but not written. Standard
//! length-prefixed framing can be enabled through the [`ser::EncoderConfig`]:
//!
//! ```
//! let mut registry = avro_lite::SchemaRegistry::new();
//! registry.config_mut().length_prefixed_strings();
//! assert_eq!(
//! 	registry
//! 		.encode(&"foo".into(), Some("string"))
//! 		.expect("Failed to encode"),
//! 	[6, b'f', b'o', b'o']
//! );
//! ```
//!
//! # Unions
//!
//! Values are encoded against a union either as `null` (if the union has a
//! `null` alternative) or wrapped in a single-key map naming the alternative:
//! `{"string": "foo"}`. The
//! [`short_unions`](ser::EncoderConfig::short_unions) option additionally
//! allows bare values for two-branch unions with a `null` alternative.
//!
//! # 64-bit integers
//!
//! `long` is rejected anywhere in a schema, as well as as an encoding target.

mod registry;
pub mod schema;
pub mod ser;
mod validate;
mod value;

pub use {
	registry::{SchemaRegistry, UnknownSchema},
	value::Value,
};
