//! Builder configuration, loaded from TOML.
//!
//! ```toml
//! max_limit = 1000
//! max_path_depth = 16
//! reject_falsy = false
//! ```


use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// QueryConfig
///
/// Defaults impose no limits and accept any non-null primitive literal.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Largest value `limit` accepts.
    pub max_limit: Option<u64>,

    /// Longest dotted path, in segments, any call accepts.
    pub max_path_depth: Option<usize>,

    /// Reject falsy literals (`false`, `0`, `""`) in comparisons and `in`
    /// lists, matching loose truthiness checks of older clients.
    pub reject_falsy: bool,
}

impl QueryConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_path_depth == Some(0) {
            return Err(ConfigError::Invalid(
                "max_path_depth must be at least 1".to_string(),
            ));
        }
        if self.max_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "max_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
