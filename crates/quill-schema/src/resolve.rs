//! Dotted-path resolution through a schema tree.
//!
//! Intermediate segments descend through objects; an intermediate array is
//! unwrapped to its `item` before descending. The terminal node is returned
//! as declared, so a path ending on an array yields the array itself.

#[cfg(test)]
mod tests;

use crate::{
    PATH_SEPARATOR,
    error::PathError,
    node::{Prop, Schema},
};

/// Resolve `path` against `schema` with no depth limit.
pub fn resolve<'s>(schema: &'s Schema, path: &str) -> Result<&'s Prop, PathError> {
    resolve_bounded(schema, path, None)
}

/// Resolve `path`, rejecting paths with more than `max_depth` segments.
pub fn resolve_bounded<'s>(
    schema: &'s Schema,
    path: &str,
    max_depth: Option<usize>,
) -> Result<&'s Prop, PathError> {
    let segments = split_path(schema, path, max_depth)?;

    let mut children: &'s [Prop] = &schema.props;
    let mut current: Option<&'s Prop> = None;

    for (i, segment) in segments.iter().enumerate() {
        if let Some(node) = current {
            children = descend(node).ok_or_else(|| PathError::NotContainer {
                handle: schema.handle.clone(),
                path: path.to_string(),
                prefix: prefix(&segments, i),
            })?;
        }

        let prop = children
            .iter()
            .find(|p| p.key() == Some(*segment))
            .ok_or_else(|| PathError::UnresolvedPath {
                handle: schema.handle.clone(),
                path: path.to_string(),
                prefix: prefix(&segments, i),
            })?;

        current = Some(prop);
    }

    // split_path never yields an empty segment list
    current.ok_or_else(|| invalid(schema, path, "no segments"))
}

// Split and check the raw path before any lookup happens.
fn split_path<'p>(
    schema: &Schema,
    path: &'p str,
    max_depth: Option<usize>,
) -> Result<Vec<&'p str>, PathError> {
    if path.is_empty() {
        return Err(invalid(schema, path, "empty path"));
    }

    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(invalid(schema, path, "empty segment"));
    }

    if let Some(max) = max_depth
        && segments.len() > max
    {
        return Err(invalid(
            schema,
            path,
            &format!("more than {max} segments"),
        ));
    }

    Ok(segments)
}

// Children of `node` for the next segment: its own props if present,
// otherwise the props of its array item. `None` if the node (after one
// array unwrap) is not a container.
fn descend(node: &Prop) -> Option<&[Prop]> {
    if let Some(props) = node.props.as_deref() {
        return Some(props);
    }

    let node = match &node.item {
        Some(item) if node.is_array() => item.as_ref(),
        _ => node,
    };

    if !node.ty.is_container() {
        return None;
    }

    Some(node.props.as_deref().unwrap_or_default())
}

fn prefix(segments: &[&str], i: usize) -> String {
    segments[..=i].join(".")
}

fn invalid(schema: &Schema, path: &str, reason: &str) -> PathError {
    PathError::InvalidPath {
        handle: schema.handle.clone(),
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
