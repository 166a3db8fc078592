//! Core of quill: schema-validated builders that compile chained `where`,
//! ordering, pagination, field-selection and population calls into a
//! `QueryDescriptor` for an external executor.

// public exports are one module level down
pub mod config;
pub mod error;
pub mod obs;
pub mod query;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

// re-exports
pub use config::{ConfigError, QueryConfig};
pub use error::{Call, ErrorKind, QueryError};
pub use query::{PredicateBuilder, QueryBuilder, QueryDescriptor, WhereArgs};
pub use value::Value;

///
/// Prelude
///
/// Builder vocabulary only. Errors, sinks and config loading stay at their
/// module paths.
///

pub mod prelude {
    pub use crate::{
        query::{BoolOp, Direction, Operator, PredicateBuilder, QueryBuilder, WhereArgs},
        value::Value,
    };
}
