use crate::query::Operator;
use derive_more::Display;
use quill_schema::PathError;
use thiserror::Error as ThisError;

///
/// Call
///
/// Builder entry point that raised an error; prefixes every message.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Call {
    #[display("limit")]
    Limit,
    #[display("orderBy")]
    OrderBy,
    #[display("pluck")]
    Pluck,
    #[display("populate")]
    Populate,
    #[display("where")]
    Where,
}

///
/// ErrorKind
///
/// Flat error taxonomy so callers can match on kind instead of message text.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorKind {
    Argument,
    InvalidOperator,
    InvalidPath,
    NotContainer,
    OperatorNotSupported,
    TypeMismatch,
    UnresolvedPath,

    /// Value-level type error: the literal itself is not usable.
    Value,
}

impl From<&PathError> for ErrorKind {
    fn from(err: &PathError) -> Self {
        match err {
            PathError::InvalidPath { .. } => Self::InvalidPath,
            PathError::NotContainer { .. } => Self::NotContainer,
            PathError::UnresolvedPath { .. } => Self::UnresolvedPath,
        }
    }
}

///
/// QueryError
///
/// Every failing builder call returns one of these and leaves the builder
/// exactly as it was before the call.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("pluck: invalid argument at index {index}: {source}")]
    Pluck {
        index: usize,
        #[source]
        source: PathError,
    },

    #[error("{call}: {message}, schema: '{handle}'")]
    Argument {
        call: Call,
        handle: String,
        message: String,
    },

    #[error(
        "where: invalid operator '{operator}', expect one of {expected}, schema: '{handle}'",
        expected = Operator::expected_list()
    )]
    InvalidOperator { handle: String, operator: String },

    #[error(
        "where: can not compare values in array '{path}' using operator '{operator}', schema: '{handle}'"
    )]
    OperatorNotSupported {
        handle: String,
        path: String,
        operator: Operator,
    },

    #[error("{call}: {message}, schema: '{handle}'")]
    TypeMismatch {
        call: Call,
        handle: String,
        path: String,
        message: String,
    },

    #[error("{call}: {message}, schema: '{handle}'")]
    Value {
        call: Call,
        handle: String,
        message: String,
    },
}

impl QueryError {
    pub(crate) fn argument(call: Call, handle: &str, message: impl Into<String>) -> Self {
        Self::Argument {
            call,
            handle: handle.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn type_mismatch(
        call: Call,
        handle: &str,
        path: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            call,
            handle: handle.to_string(),
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn value(call: Call, handle: &str, message: impl Into<String>) -> Self {
        Self::Value {
            call,
            handle: handle.to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Path(err) | Self::Pluck { source: err, .. } => err.into(),
            Self::Argument { .. } => ErrorKind::Argument,
            Self::InvalidOperator { .. } => ErrorKind::InvalidOperator,
            Self::OperatorNotSupported { .. } => ErrorKind::OperatorNotSupported,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Value { .. } => ErrorKind::Value,
        }
    }

    /// Handle of the schema the failing call was validated against.
    #[must_use]
    pub fn handle(&self) -> &str {
        match self {
            Self::Path(err) | Self::Pluck { source: err, .. } => err.handle(),
            Self::Argument { handle, .. }
            | Self::InvalidOperator { handle, .. }
            | Self::OperatorNotSupported { handle, .. }
            | Self::TypeMismatch { handle, .. }
            | Self::Value { handle, .. } => handle,
        }
    }
}
