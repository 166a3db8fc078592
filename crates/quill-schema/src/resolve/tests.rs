use super::*;
use crate::node::PropType;
use proptest::prelude::*;
use serde_json::json;

fn schema_from(value: serde_json::Value) -> Schema {
    serde_json::from_value(value).expect("fixture schema should deserialize")
}

fn nested_objects() -> Schema {
    schema_from(json!({
        "handle": "schema",
        "props": [
            { "key": "a", "type": "object", "props": [
                { "key": "b", "type": "object", "props": [
                    { "key": "c", "type": "object", "props": [
                        { "key": "p", "type": "string" }
                    ]}
                ]}
            ]}
        ]
    }))
}

fn mixed() -> Schema {
    schema_from(json!({
        "handle": "schema",
        "props": [
            { "key": "a", "type": "object", "props": [
                { "key": "b", "type": "array", "item": {
                    "type": "object",
                    "props": [
                        { "key": "c", "type": "object", "props": [
                            { "key": "p", "type": "array", "item": { "type": "string" } }
                        ]}
                    ]
                }}
            ]}
        ]
    }))
}

#[test]
fn empty_path_is_invalid() {
    let schema = Schema::new("schema", vec![]);
    let err = resolve(&schema, "").unwrap_err();

    assert!(matches!(err, PathError::InvalidPath { .. }));
    assert!(err.to_string().contains("invalid"));
    assert!(err.to_string().contains("schema: 'schema'"));
}

#[test]
fn empty_segments_are_invalid() {
    let schema = nested_objects();

    for path in [".a", "a.", "a..b", "."] {
        let err = resolve(&schema, path).unwrap_err();
        assert!(
            matches!(err, PathError::InvalidPath { .. }),
            "expected invalid path for {path:?}, got {err:?}"
        );
    }
}

#[test]
fn every_object_prefix_resolves_to_its_node() {
    let schema = nested_objects();
    let segments = ["a", "b", "c"];

    for i in 0..segments.len() {
        let path = segments[..=i].join(".");
        let prop = resolve(&schema, &path).unwrap();

        assert_eq!(prop.key(), Some(segments[i]));
        assert_eq!(prop.ty, PropType::Object);
    }

    let leaf = resolve(&schema, "a.b.c.p").unwrap();
    assert_eq!(leaf, &Prop::new("p", "string"));
}

#[test]
fn intermediate_array_is_unwrapped() {
    let schema = schema_from(json!({
        "handle": "schema",
        "props": [
            { "key": "a", "type": "object", "props": [
                { "key": "b", "type": "array", "item": {
                    "type": "object",
                    "props": [ { "key": "p", "type": "string" } ]
                }}
            ]}
        ]
    }));

    assert_eq!(
        resolve(&schema, "a.b.p").unwrap(),
        &Prop::new("p", "string")
    );
}

#[test]
fn terminal_array_is_returned_as_declared() {
    let schema = mixed();

    let prop = resolve(&schema, "a.b.c.p").unwrap();
    assert_eq!(prop, &Prop::array("p", Prop::anonymous("string")));

    // the array node, not its object item
    let prop = resolve(&schema, "a.b").unwrap();
    assert_eq!(prop.ty, PropType::Array);
    assert_eq!(prop.item_type(), Some(&PropType::Object));
}

#[test]
fn descending_past_a_primitive_fails() {
    let schema = mixed();
    let err = resolve(&schema, "a.b.c.p.a").unwrap_err();

    assert_eq!(
        err,
        PathError::NotContainer {
            handle: "schema".to_string(),
            path: "a.b.c.p.a".to_string(),
            prefix: "a.b.c.p.a".to_string(),
        }
    );
    assert!(err.to_string().contains("not object or array"));
}

#[test]
fn unknown_key_names_the_failing_prefix() {
    let schema = nested_objects();
    let err = resolve(&schema, "a.x.c").unwrap_err();

    assert_eq!(err.prefix(), Some("a.x"));
    assert_eq!(err.path(), "a.x.c");
    assert!(matches!(err, PathError::UnresolvedPath { .. }));
    assert!(err.to_string().contains("can not resolve path 'a.x' in 'a.x.c'"));
}

#[test]
fn array_without_item_has_no_children() {
    let schema = schema_from(json!({
        "handle": "broken",
        "props": [ { "key": "list", "type": "array" } ]
    }));

    let err = resolve(&schema, "list.x").unwrap_err();
    assert!(matches!(err, PathError::UnresolvedPath { .. }));
    assert_eq!(err.handle(), "broken");
}

#[test]
fn first_duplicate_key_wins() {
    let schema = Schema::new(
        "dup",
        vec![Prop::new("x", "string"), Prop::new("x", "integer")],
    );

    assert_eq!(resolve(&schema, "x").unwrap().ty, PropType::String);
}

#[test]
fn depth_limit_rejects_long_paths() {
    let schema = nested_objects();

    assert!(resolve_bounded(&schema, "a.b.c", Some(3)).is_ok());

    let err = resolve_bounded(&schema, "a.b.c.p", Some(3)).unwrap_err();
    assert!(matches!(err, PathError::InvalidPath { .. }));
    assert!(err.to_string().contains("more than 3 segments"));
}

// Build a chain of nested objects (optionally wrapped in arrays) ending in
// a string leaf, returning the schema and the key of each level.
fn chain_schema(levels: &[(String, bool)]) -> Schema {
    let mut node = Prop::new("leaf", "string");

    for (key, wrap_in_array) in levels.iter().rev() {
        node = if *wrap_in_array {
            Prop::array(key.clone(), Prop::anonymous_object(vec![node]))
        } else {
            Prop::object(key.clone(), vec![node])
        };
    }

    Schema::new("generated", vec![node])
}

proptest! {
    #[test]
    fn generated_chains_resolve_at_every_depth(
        levels in prop::collection::vec(("[a-z]{1,6}", any::<bool>()), 1..6)
    ) {
        let schema = chain_schema(&levels);
        let keys: Vec<&str> = levels.iter().map(|(k, _)| k.as_str()).collect();

        for i in 0..keys.len() {
            let path = keys[..=i].join(".");
            let prop = resolve(&schema, &path).unwrap();
            prop_assert_eq!(prop.key(), Some(keys[i]));
        }

        let leaf_path = format!("{}.leaf", keys.join("."));
        prop_assert_eq!(resolve(&schema, &leaf_path).unwrap().ty.clone(), PropType::String);

        let past_leaf = format!("{leaf_path}.more");
        let is_not_container = matches!(
            resolve(&schema, &past_leaf),
            Err(PathError::NotContainer { .. })
        );
        prop_assert!(is_not_container);
    }
}
