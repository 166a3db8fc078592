use quill::{Error, load_schema, prelude::*};
use serde_json::json;
use time::macros::date;

const USER_SCHEMA: &str = include_str!("fixtures/user.json");

fn user_schema() -> Schema {
    load_schema(USER_SCHEMA).expect("fixture schema should load")
}

#[test]
fn chain_compiles_to_descriptor() -> Result<(), Error> {
    let schema = user_schema();

    let mut qb = QueryBuilder::new(&schema);
    qb.and_where(("name", "n1"))?
        .or_where(("age", "gt", 10))?
        .limit(5)?
        .skip(2)
        .order_by("name")?
        .pluck(["name", "complex.nested.value"])?;

    let json = qb.compile().to_json()?;
    assert_eq!(
        json,
        json!({
            "limit": 5,
            "skip": 2,
            "where": [
                {
                    "type": "part",
                    "path": "name",
                    "prop": { "key": "name", "type": "string" },
                    "operator": "eq",
                    "value": "n1",
                    "bool": "and",
                    "not": false
                },
                {
                    "type": "part",
                    "path": "age",
                    "prop": { "key": "age", "type": "integer" },
                    "operator": "gt",
                    "value": 10,
                    "bool": "or",
                    "not": false
                }
            ],
            "orderBy": [
                { "path": "name", "prop": { "key": "name", "type": "string" }, "direction": "asc" }
            ],
            "pluck": [
                { "path": "name", "prop": { "key": "name", "type": "string" } },
                { "path": "complex.nested.value", "prop": { "key": "value", "type": "integer" } }
            ],
            "populate": []
        })
    );

    Ok(())
}

#[test]
fn grouped_query_with_population() -> Result<(), Error> {
    let schema = user_schema();

    let mut qb = QueryBuilder::new(&schema);
    qb.where_not_group(|p| {
        p.and_where(("age", ">=", 18))?
            .or_where(("complex.key", "in", vec!["a", "b"]))?;
        Ok(())
    })?
    .populate("related", "user")?
    .order_by_desc("age")?;

    let q = qb.compile();
    let group = q.predicates[0].as_group().expect("group node");
    assert!(group.negated);
    assert_eq!(group.parts.len(), 2);
    assert_eq!(group.parts[1].bool_op(), BoolOp::Or);

    assert_eq!(q.order_by[0].direction, Direction::Desc);
    assert_eq!(q.populate[0].schema, "user");
    assert!(q.pluck.is_none());

    Ok(())
}

#[test]
fn dates_are_accepted_as_values() -> Result<(), Error> {
    let schema = user_schema();

    let mut qb = QueryBuilder::new(&schema);
    qb.and_where(("complex.key", "<", date!(2024 - 02 - 29)))?;

    let json = qb.compile().to_json()?;
    assert_eq!(json["where"][0]["value"], json!("2024-02-29"));

    Ok(())
}

#[test]
fn errors_convert_into_facade_error() {
    let schema = user_schema();
    let mut qb = QueryBuilder::new(&schema);

    let result: Result<(), Error> = qb
        .and_where(("complex.nested.value.x", 1))
        .map(|_| ())
        .map_err(Error::from);

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Query(_)));
    assert_eq!(
        err.to_string(),
        "path 'complex.nested.value.x' in 'complex.nested.value.x' is not object or array type, schema: 'schema'"
    );
}

#[test]
fn invalid_schemas_are_rejected_on_load() {
    let err = load_schema(r#"{ "handle": "", "props": [{ "type": "string" }] }"#).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));

    let err = load_schema("{").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn config_from_toml_applies_to_builders() -> Result<(), Error> {
    let schema = user_schema();
    let config = QueryConfig::from_toml_str("max_limit = 50\nmax_path_depth = 2\n")?;

    let mut qb = QueryBuilder::with_config(&schema, config);
    assert!(qb.limit(51).is_err());
    assert!(qb.pluck(["complex.nested.value"]).is_err());
    qb.limit(50)?.pluck(["complex.nested"])?;

    assert_eq!(qb.compile().limit, Some(50));

    Ok(())
}

#[test]
fn version_is_exported() {
    assert!(!quill::VERSION.is_empty());
}
