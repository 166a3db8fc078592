//! Fluent query building.
//!
//! `PredicateBuilder` compiles chained `where` calls into an ordered list of
//! `PredicateNode`s; `QueryBuilder` adds ordering, pagination, field
//! selection and relation population and compiles a `QueryDescriptor`.
//! Nothing here executes a query.

mod args;
mod node;
mod ops;

pub mod builder;
pub mod descriptor;
pub mod predicate;

use crate::{config::QueryConfig, value::Value};
use quill_schema::{PathError, Prop, Schema, resolve_bounded};

// re-exports
pub use args::WhereArgs;
pub use builder::QueryBuilder;
pub use descriptor::{OrderStatement, PluckField, PopulateStatement, QueryDescriptor};
pub use node::{PredicateGroup, PredicateNode, PredicatePart};
pub use ops::{BoolOp, Direction, DirectionParseError, Operator, ParsedOperator};
pub use predicate::PredicateBuilder;

// Path resolution with the configured depth bound applied.
pub(crate) fn resolve_path<'s>(
    schema: &'s Schema,
    config: &QueryConfig,
    path: &str,
) -> Result<&'s Prop, PathError> {
    resolve_bounded(schema, path, config.max_path_depth)
}

// A literal usable on the right-hand side of a comparison.
pub(crate) fn is_comparable(value: &Value, config: &QueryConfig) -> bool {
    value.is_comparable() && (!config.reject_falsy || value.is_truthy())
}
