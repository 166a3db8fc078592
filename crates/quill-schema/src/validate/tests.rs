use super::*;
use serde_json::json;

fn schema_from(value: serde_json::Value) -> Schema {
    serde_json::from_value(value).expect("fixture schema should deserialize")
}

#[test]
fn well_formed_schema_passes() {
    let schema = schema_from(json!({
        "handle": "schema",
        "props": [
            { "key": "name", "type": "string" },
            { "key": "related", "type": "array", "item": { "type": "string" } },
            { "key": "complex", "type": "object", "props": [
                { "key": "nested", "type": "object", "props": [
                    { "key": "value", "type": "integer" }
                ]}
            ]},
            { "key": "rows", "type": "array", "item": {
                "type": "object",
                "props": [ { "key": "at", "type": "date" } ]
            }}
        ]
    }));

    assert_eq!(schema.validate(), Ok(()));
}

#[test]
fn every_issue_is_reported() {
    let schema = schema_from(json!({
        "handle": " ",
        "props": [
            { "key": "obj", "type": "object" },
            { "key": "list", "type": "array" },
            { "type": "string" },
            { "key": "a.b", "type": "string" },
            { "key": "dup", "type": "string" },
            { "key": "dup", "type": "integer" },
            { "key": "rows", "type": "array", "item": {
                "type": "object",
                "props": [ { "key": "", "type": "string" } ]
            }}
        ]
    }));

    let err = schema.validate().unwrap_err();
    let tree = &err.errors;

    assert_eq!(tree.len(), 7);
    assert_eq!(
        tree.messages(""),
        &[
            "schema handle must not be empty".to_string(),
            "prop at index 2 has no key".to_string(),
            "key 'a.b' contains '.' and can not be addressed".to_string(),
            "duplicate key 'dup'".to_string(),
        ]
    );
    assert_eq!(tree.messages("obj"), &["object must declare props".to_string()]);
    assert_eq!(tree.messages("list"), &["array must declare an item".to_string()]);
    assert_eq!(
        tree.messages("rows[]"),
        &["prop at index 0 has an empty key".to_string()]
    );
}

#[test]
fn error_display_lists_routes() {
    let schema = Schema::new("people", vec![Prop::anonymous_object(vec![])]);
    let err = schema.validate().unwrap_err();

    assert_eq!(
        err.to_string(),
        "schema 'people' failed validation:\n<root>: prop at index 0 has no key"
    );
}

#[test]
fn unknown_types_round_trip() {
    let schema = schema_from(json!({
        "handle": "geo",
        "props": [ { "key": "where", "type": "point" } ]
    }));

    assert_eq!(schema.props[0].ty, PropType::Other("point".to_string()));
    assert!(!schema.props[0].ty.is_primitive());
    assert_eq!(schema.validate(), Ok(()));

    let back = serde_json::to_value(&schema).unwrap();
    assert_eq!(back["props"][0]["type"], json!("point"));
}
