use {
	avro_lite::{
		schema::{LoadErrorKind, PathSegment, SchemaNode},
		SchemaRegistry,
	},
	pretty_assertions::assert_eq,
	serde_json::json,
};

#[test]
fn loads_a_simple_string_schema() {
	let mut registry = SchemaRegistry::new();
	registry.load(&json!("string")).unwrap();
	assert!(matches!(registry.last_loaded(), Some(SchemaNode::String)));
}

#[test]
fn loads_a_simple_record_schema() {
	let mut registry = SchemaRegistry::new();
	registry
		.load(&json!({
			"type": "record",
			"name": "a",
			"fields": [{ "name": "b", "type": "int" }]
		}))
		.unwrap();
	assert!(registry.contains("a"));
	match registry.get("a") {
		Some(SchemaNode::Record(record)) => {
			assert_eq!(record.name.fully_qualified_name(), "a");
			assert_eq!(record.fields.len(), 1);
			assert_eq!(record.fields[0].name, "b");
			assert!(record.fields[0].default.is_none());
		}
		other => panic!("Expected record, got {other:?}"),
	}
}

#[test]
fn loads_a_simple_array_schema() {
	let mut registry = SchemaRegistry::new();
	// The name of an array is meaningless but tolerated
	registry
		.load(&json!({ "type": "array", "name": "a", "items": "int" }))
		.unwrap();
	assert!(matches!(registry.last_loaded(), Some(SchemaNode::Array(_))));
	assert!(!registry.contains("a"));
}

#[test]
fn loads_a_simple_map_schema() {
	let mut registry = SchemaRegistry::new();
	registry
		.load(&json!({
			"type": "map",
			"name": "a",
			"keys": "string",
			"values": "boolean"
		}))
		.unwrap();
	assert!(matches!(registry.last_loaded(), Some(SchemaNode::Map(_))));
}

#[test]
fn prohibits_long() {
	let mut registry = SchemaRegistry::new();
	let error = registry.load(&json!("long")).unwrap_err();
	assert!(matches!(error.kind(), LoadErrorKind::LongUnsupported));
	assert_eq!(error.path(), "root");

	let error = registry
		.load(&json!({
			"type": "record",
			"name": "a",
			"fields": [{ "name": "b", "type": { "type": "array", "items": "long" } }]
		}))
		.unwrap_err();
	assert!(matches!(error.kind(), LoadErrorKind::LongUnsupported));
	assert_eq!(error.path(), "root.b.items");
	assert!(registry.last_loaded().is_none());
}

#[test]
fn prohibits_unrecognized_symbols() {
	let mut registry = SchemaRegistry::new();
	let error = registry.load(&json!("schlong")).unwrap_err();
	match error.kind() {
		LoadErrorKind::UnknownReference(name) => assert_eq!(name, "schlong"),
		other => panic!("Unexpected error kind: {other:?}"),
	}
}

#[test]
fn prohibits_unnamed_records() {
	let mut registry = SchemaRegistry::new();
	let error = registry
		.load(&json!({
			"type": "record",
			"fields": [{ "name": "b", "type": "string" }]
		}))
		.unwrap_err();
	assert!(matches!(
		error.kind(),
		LoadErrorKind::MissingName { type_: "record" }
	));

	let error = registry
		.load(&json!({
			"type": "record",
			"name": 1,
			"fields": []
		}))
		.unwrap_err();
	assert!(matches!(error.kind(), LoadErrorKind::InvalidName { .. }));
}

#[test]
fn prohibits_duplicate_field_names() {
	let mut registry = SchemaRegistry::new();
	let error = registry
		.load(&json!({
			"type": "record",
			"name": "R",
			"fields": [
				{ "name": "x", "type": "int" },
				{ "name": "y", "type": "int" },
				{ "name": "x", "type": "string" }
			]
		}))
		.unwrap_err();
	match error.kind() {
		LoadErrorKind::DuplicateFieldName(name) => assert_eq!(name, "x"),
		other => panic!("Unexpected error kind: {other:?}"),
	}
	assert_eq!(error.path(), "root.x");
	assert!(!registry.contains("R"));
	assert!(registry.last_loaded().is_none());

	// Nested records are checked too
	let error = registry
		.load(&json!({
			"type": "array",
			"items": {
				"type": "record",
				"name": "Inner",
				"fields": [{ "name": "a", "type": "int" }, { "name": "a", "type": "int" }]
			}
		}))
		.unwrap_err();
	assert!(matches!(error.kind(), LoadErrorKind::DuplicateFieldName(_)));
	assert_eq!(error.path(), "root.items.a");
}

#[test]
fn displays_the_path_of_failure_in_the_error() {
	let mut registry = SchemaRegistry::new();
	let error = registry
		.load(&json!({
			"type": "record",
			"name": "a",
			"fields": [{
				"name": "b",
				"type": {
					"type": "map",
					"keys": "string",
					"values": ["string", "blah"]
				}
			}]
		}))
		.unwrap_err();
	assert_eq!(error.path(), "root.b.values:1");
	assert_eq!(
		error.segments().cloned().collect::<Vec<_>>(),
		vec![
			PathSegment::Field("b".to_owned()),
			PathSegment::Values,
			PathSegment::UnionVariant(1),
		]
	);
	assert_eq!(
		error.to_string(),
		"Invalid schema at root.b.values:1: The Schema contains an unknown reference: blah"
	);
}

#[test]
fn rejects_invalid_nodes() {
	let mut registry = SchemaRegistry::new();
	for schema in [json!(1), json!(null), json!(true), json!([]), json!({})] {
		assert!(registry.load(&schema).is_err(), "{schema} should not load");
	}
	let error = registry
		.load(&json!({ "type": "array", "items": ["int", 3] }))
		.unwrap_err();
	assert!(matches!(error.kind(), LoadErrorKind::InvalidNode(_)));
	assert_eq!(error.path(), "root.items:1");

	let error = registry.load(&json!({ "type": "map" })).unwrap_err();
	assert!(matches!(
		error.kind(),
		LoadErrorKind::MissingAttribute {
			type_: "map",
			attribute: "values"
		}
	));
}

#[test]
fn checks_named_type_attributes() {
	let mut registry = SchemaRegistry::new();
	for schema in [
		json!({ "type": "enum", "name": "E", "symbols": ["A", "A"] }),
		json!({ "type": "enum", "name": "E", "symbols": [1] }),
		json!({ "type": "enum", "name": "E" }),
		json!({ "type": "fixed", "name": "F", "size": -1 }),
		json!({ "type": "fixed", "name": "F", "size": "4" }),
		json!({ "type": "record", "name": "R", "fields": {} }),
		json!({ "type": "record", "name": "R", "fields": [{ "type": "int" }] }),
		json!({ "type": "record", "name": "R", "fields": [{ "name": "x" }] }),
	] {
		assert!(registry.load(&schema).is_err(), "{schema} should not load");
	}
	assert_eq!(registry.names().count(), 0);
}

#[test]
fn same_definition_loads_idempotently() {
	let schema = json!({
		"type": "record",
		"name": "a",
		"fields": [{ "name": "b", "type": "int" }]
	});
	let mut registry = SchemaRegistry::new();
	registry.load(&schema).unwrap();
	registry.load(&schema).unwrap();
	assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a"]);

	// Also when the named type appears nested in another schema
	registry
		.load(&json!({ "type": "array", "items": schema }))
		.unwrap();
	assert_eq!(registry.names().count(), 1);
}

#[test]
fn different_definition_under_the_same_name_fails() {
	let mut registry = SchemaRegistry::new();
	registry
		.load(&json!({
			"type": "record",
			"name": "a",
			"fields": [{ "name": "b", "type": "int" }]
		}))
		.unwrap();
	let error = registry
		.load(&json!({
			"type": "record",
			"name": "a",
			"fields": [{ "name": "b", "type": "string" }]
		}))
		.unwrap_err();
	match error.kind() {
		LoadErrorKind::ConflictingDefinition(name) => {
			assert_eq!(name.fully_qualified_name(), "a")
		}
		other => panic!("Unexpected error kind: {other:?}"),
	}
	// The first definition is kept
	assert_eq!(
		registry.symbols().get("a").unwrap().definition()["fields"][0]["type"],
		json!("int")
	);
	assert!(registry
		.encode(&json!({ "b": 1 }).into(), Some("a"))
		.is_ok());
}

#[test]
fn record_namespace_applies_to_nested_names() {
	let mut registry = SchemaRegistry::new();
	registry
		.load_with_namespace(
			&json!({
				"type": "record",
				"name": "Outer",
				"namespace": "com.example",
				"fields": [
					{
						"name": "kind",
						"type": { "type": "enum", "name": "Kind", "symbols": ["A", "B"] }
					},
					{ "name": "again", "type": "Kind" },
					{ "name": "qualified", "type": "com.example.Kind" }
				]
			}),
			Some("caller.ns"),
		)
		.unwrap();
	assert!(registry.contains("com.example.Outer"));
	assert!(registry.contains("com.example.Kind"));
	assert!(!registry.contains("caller.ns.Kind"));
	assert!(!registry.contains("Kind"));
}

#[test]
fn caller_namespace_applies_when_none_is_declared() {
	let mut registry = SchemaRegistry::new();
	registry
		.load_with_namespace(
			&json!({
				"type": "record",
				"name": "Rec",
				"fields": [
					{ "name": "f", "type": { "type": "fixed", "name": "F", "size": 2 } },
					{
						"name": "g",
						"type": { "type": "fixed", "name": "G", "namespace": "", "size": 2 }
					},
					{ "name": "h", "type": { "type": "fixed", "name": "x.H", "size": 2 } }
				]
			}),
			Some("caller.ns"),
		)
		.unwrap();
	let mut names = registry.names().collect::<Vec<_>>();
	names.sort_unstable();
	assert_eq!(names, vec!["G", "caller.ns.F", "caller.ns.Rec", "x.H"]);
}

#[test]
fn unqualified_references_fall_back_to_the_null_namespace() {
	let mut registry = SchemaRegistry::new();
	registry
		.load(&json!({ "type": "fixed", "name": "Md5", "size": 16 }))
		.unwrap();
	registry
		.load(&json!({
			"type": "record",
			"name": "Entry",
			"namespace": "com.example",
			"fields": [{ "name": "hash", "type": "Md5" }]
		}))
		.unwrap();
	assert!(registry.contains("com.example.Entry"));
}

#[test]
fn failed_load_registers_nothing() {
	let mut registry = SchemaRegistry::new();
	registry.load(&json!("int")).unwrap();
	let error = registry
		.load(&json!({
			"type": "record",
			"name": "R",
			"fields": [
				{ "name": "e", "type": { "type": "enum", "name": "E", "symbols": ["A"] } },
				{ "name": "l", "type": "long" }
			]
		}))
		.unwrap_err();
	assert_eq!(error.path(), "root.l");
	assert!(!registry.contains("R"));
	assert!(!registry.contains("E"));
	assert!(matches!(registry.last_loaded(), Some(SchemaNode::Int)));

	// E can now be defined differently, since it was never registered
	registry
		.load(&json!({ "type": "enum", "name": "E", "symbols": ["X", "Y"] }))
		.unwrap();
	assert!(registry.contains("E"));
}

#[test]
fn forward_references_are_resolved_in_load_order() {
	let mut registry = SchemaRegistry::new();
	let error = registry
		.load(&json!({
			"type": "record",
			"name": "A",
			"fields": [
				{ "name": "b", "type": "B" },
				{ "name": "b_def", "type": { "type": "fixed", "name": "B", "size": 1 } }
			]
		}))
		.unwrap_err();
	assert!(matches!(error.kind(), LoadErrorKind::UnknownReference(_)));
	assert_eq!(error.path(), "root.b");

	// Defined by an earlier load, it becomes visible
	registry
		.load(&json!({ "type": "fixed", "name": "B", "size": 1 }))
		.unwrap();
	registry
		.load(&json!({
			"type": "record",
			"name": "A",
			"fields": [{ "name": "b", "type": "B" }]
		}))
		.unwrap();
}

#[test]
fn self_referential_records() {
	let mut registry = SchemaRegistry::new();
	registry
		.load(&json!({
			"type": "record",
			"name": "LinkedList",
			"fields": [
				{ "name": "value", "type": "int" },
				{ "name": "next", "type": ["null", "LinkedList"] }
			]
		}))
		.unwrap();
	assert!(registry
		.validate(
			&json!({ "value": 1, "next": { "value": 2, "next": null } }).into(),
			None
		)
		.unwrap());
}

#[test]
fn aliases_point_to_the_same_type() {
	let mut registry = SchemaRegistry::new();
	registry
		.load(&json!({
			"type": "enum",
			"name": "Color",
			"namespace": "paint",
			"aliases": ["Colour", "legacy.Shade"],
			"symbols": ["RED", "BLUE"]
		}))
		.unwrap();
	for name in ["paint.Color", "paint.Colour", "legacy.Shade"] {
		assert!(
			matches!(registry.get(name), Some(SchemaNode::Enum(_))),
			"{name} should be registered"
		);
	}
	assert_eq!(
		registry.symbols().get("paint.Colour").map(|s| s.key()),
		registry.symbols().get("paint.Color").map(|s| s.key())
	);
}

#[test]
fn nested_type_objects_are_unwrapped() {
	let mut registry = SchemaRegistry::new();
	registry
		.load(&json!({ "type": { "type": "array", "items": "int" } }))
		.unwrap();
	assert!(matches!(registry.last_loaded(), Some(SchemaNode::Array(_))));

	registry
		.load(&json!({ "type": ["null", "int"] }))
		.unwrap();
	assert!(matches!(registry.last_loaded(), Some(SchemaNode::Union(_))));

	let error = registry
		.load(&json!({ "type": { "type": "array", "items": "int" }, "items": "string" }))
		.unwrap_err();
	assert!(matches!(
		error.kind(),
		LoadErrorKind::NestedTypeWithProperties
	));
}

#[test]
fn empty_unions_are_rejected() {
	let mut registry = SchemaRegistry::new();
	let error = registry
		.load(&json!({ "type": "array", "items": [] }))
		.unwrap_err();
	assert!(matches!(error.kind(), LoadErrorKind::EmptyUnion));
	assert_eq!(error.path(), "root.items");
}

#[test]
fn loads_schema_text() {
	let mut registry = SchemaRegistry::new();
	registry
		.load_str(r#"{"type": "enum", "name": "E", "symbols": ["A"]}"#)
		.unwrap();
	assert!(registry.contains("E"));

	let error = registry.load_str(r#"{"type": "#).unwrap_err();
	assert!(matches!(error.kind(), LoadErrorKind::Json(_)));
}

#[test]
fn lookup_by_primitive_name() {
	let registry = SchemaRegistry::new();
	assert!(matches!(registry.get("double"), Some(SchemaNode::Double)));
	assert!(registry.get("long").is_none());
	assert!(registry.get("nope").is_none());
	assert!(registry.last_loaded().is_none());
}
