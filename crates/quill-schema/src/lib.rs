//! Schema model for quill: the read-only property tree a query is validated
//! against, plus dotted-path resolution and structural validation.
//!
//! ## Crate layout
//! - `node`: `Schema`, `Prop` and `PropType`.
//! - `resolve`: walks dotted paths through object and array wrappers.
//! - `validate`: aggregated structural checks for externally loaded schemas.
//! - `error`: `PathError`, `SchemaError` and the route-keyed `ErrorTree`.

pub mod error;
pub mod node;
pub mod resolve;
pub mod validate;

/// Separator between segments of a property path.
pub const PATH_SEPARATOR: char = '.';

// re-exports
pub use error::{ErrorTree, PathError, SchemaError};
pub use node::{Prop, PropType, Schema};
pub use resolve::{resolve, resolve_bounded};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::{PathError, SchemaError},
        node::{Prop, PropType, Schema},
    };
    pub use serde::{Deserialize, Serialize};
}
