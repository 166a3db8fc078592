//! Structural validation for schemas supplied from outside.
//!
//! Resolution does not require a validated schema; these checks exist so a
//! loader can reject malformed trees up front with every problem listed.

#[cfg(test)]
mod tests;

use crate::{
    PATH_SEPARATOR,
    error::{ErrorTree, SchemaError},
    node::{Prop, PropType, Schema},
};
use std::collections::BTreeSet;

/// Validate the whole tree, aggregating every issue found.
pub(crate) fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    let mut errors = ErrorTree::new();

    if schema.handle.trim().is_empty() {
        errors.add("", "schema handle must not be empty");
    }
    validate_children(&schema.props, "", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaError {
            handle: schema.handle.clone(),
            errors,
        })
    }
}

// Children of an object (or of the root) must be keyed, addressable and unique.
fn validate_children(props: &[Prop], route: &str, errors: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for (index, prop) in props.iter().enumerate() {
        let Some(key) = prop.key() else {
            errors.add(route, format!("prop at index {index} has no key"));
            continue;
        };

        if key.is_empty() {
            errors.add(route, format!("prop at index {index} has an empty key"));
            continue;
        }
        if key.contains(PATH_SEPARATOR) {
            errors.add(
                route,
                format!("key '{key}' contains '{PATH_SEPARATOR}' and can not be addressed"),
            );
        }
        if !seen.insert(key) {
            errors.add(route, format!("duplicate key '{key}'"));
        }

        validate_node(prop, &child_route(route, key), errors);
    }
}

fn validate_node(prop: &Prop, route: &str, errors: &mut ErrorTree) {
    match prop.ty {
        PropType::Object => match prop.props.as_deref() {
            Some(props) => validate_children(props, route, errors),
            None => errors.add(route, "object must declare props"),
        },
        PropType::Array => match prop.item.as_deref() {
            Some(item) => validate_node(item, &format!("{route}[]"), errors),
            None => errors.add(route, "array must declare an item"),
        },
        _ => {}
    }
}

fn child_route(route: &str, key: &str) -> String {
    if route.is_empty() {
        key.to_string()
    } else {
        format!("{route}{PATH_SEPARATOR}{key}")
    }
}
