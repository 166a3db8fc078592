//! ## Crate layout
//! - `core`: predicate and query builders, values, config and events.
//! - `schema`: the schema tree, path resolution and structural validation.
//!
//! The `prelude` module carries the vocabulary most callers need to build
//! a query against a loaded schema.

pub use quill_core as core;
pub use quill_schema as schema;

use thiserror::Error as ThisError;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
/// any failure between loading a schema and compiling a query
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] core::ConfigError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Query(#[from] core::QueryError),

    #[error(transparent)]
    Schema(#[from] schema::SchemaError),
}

/// Parse a schema from JSON and run the structural checks on it.
pub fn load_schema(json: &str) -> Result<schema::Schema, Error> {
    let schema: schema::Schema = serde_json::from_str(json)?;
    schema.validate()?;

    Ok(schema)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::{QueryConfig, QueryDescriptor, QueryError, prelude::*},
        schema::{Prop, PropType, Schema},
    };
    pub use serde::{Deserialize, Serialize};
}
