//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration errors. Raised before any record is processed; a run
/// never starts with a partially valid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration syntax: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("field mapping `{field}` uses unknown transform `{name}`")]
    UnknownTransform { field: String, name: String },
    #[error("field mapping `{field}`: transform `{transform}` requires option `{option}`")]
    MissingOption {
        field: String,
        transform: &'static str,
        option: &'static str,
    },
    #[error("field mapping `{field}` references undeclared complex field `{key}`")]
    UndeclaredComplexField { field: String, key: String },
    #[error("`{section}` is missing its join key fields")]
    MissingJoinKey { section: &'static str },
    #[error("field mapping `{field}` is invalid: {reason}")]
    InvalidRule { field: String, reason: String },
    #[error("filter_pattern `{pattern}` is not a valid regex")]
    InvalidFilterPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
