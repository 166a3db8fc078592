use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// PathError
///
/// Failure to resolve a dotted path. `prefix` is the path up to and
/// including the segment that failed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("path '{path}' is invalid ({reason}), schema: '{handle}'")]
    InvalidPath {
        handle: String,
        path: String,
        reason: String,
    },

    #[error("path '{prefix}' in '{path}' is not object or array type, schema: '{handle}'")]
    NotContainer {
        handle: String,
        path: String,
        prefix: String,
    },

    #[error("can not resolve path '{prefix}' in '{path}', schema: '{handle}'")]
    UnresolvedPath {
        handle: String,
        path: String,
        prefix: String,
    },
}

impl PathError {
    #[must_use]
    pub fn handle(&self) -> &str {
        match self {
            Self::InvalidPath { handle, .. }
            | Self::NotContainer { handle, .. }
            | Self::UnresolvedPath { handle, .. } => handle,
        }
    }

    /// The full path that was being resolved.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidPath { path, .. }
            | Self::NotContainer { path, .. }
            | Self::UnresolvedPath { path, .. } => path,
        }
    }

    /// The failing prefix, when resolution got as far as a segment.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::InvalidPath { .. } => None,
            Self::NotContainer { prefix, .. } | Self::UnresolvedPath { prefix, .. } => {
                Some(prefix)
            }
        }
    }
}

///
/// ErrorTree
///
/// Route-keyed collection of validation messages. Routes are dotted key
/// paths, `[]` marks an array item, and the empty route is the schema root.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    errors: BTreeMap<String, Vec<String>>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, route: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(route.into())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: Self) {
        for (route, messages) in other.errors {
            self.errors.entry(route).or_default().extend(messages);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages across all routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn messages(&self, route: &str) -> &[String] {
        self.errors.get(route).map_or(&[][..], Vec::as_slice)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (route, messages) in &self.errors {
            let route = if route.is_empty() { "<root>" } else { route };
            for message in messages {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("schema '{handle}' failed validation:\n{errors}")]
pub struct SchemaError {
    pub handle: String,
    pub errors: ErrorTree,
}
