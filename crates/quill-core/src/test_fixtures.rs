use quill_schema::{Prop, Schema};
use serde_json::json;

/// The `schema` handle used across builder tests: two strings, an integer,
/// an array of strings and a two-level object.
pub fn user_schema() -> Schema {
    serde_json::from_value(json!({
        "handle": "schema",
        "props": [
            { "key": "handle", "type": "string" },
            { "key": "name", "type": "string" },
            { "key": "age", "type": "integer" },
            { "key": "related", "type": "array", "item": { "type": "string" } },
            { "key": "complex", "type": "object", "props": [
                { "key": "key", "type": "string" },
                { "key": "nested", "type": "object", "props": [
                    { "key": "value", "type": "integer" }
                ]}
            ]}
        ]
    }))
    .expect("fixture schema should deserialize")
}

/// Adds the shapes the fixture above lacks: arrays of objects, arrays of
/// numbers, dates and an array with no item.
pub fn catalog_schema() -> Schema {
    Schema::new(
        "catalog",
        vec![
            Prop::new("sku", "string"),
            Prop::new("price", "number"),
            Prop::new("released", "date"),
            Prop::array("scores", Prop::anonymous("integer")),
            Prop::array(
                "variants",
                Prop::anonymous_object(vec![Prop::new("color", "string")]),
            ),
            Prop {
                key: Some("loose".to_string()),
                ty: "array".into(),
                props: None,
                item: None,
            },
        ],
    )
}
