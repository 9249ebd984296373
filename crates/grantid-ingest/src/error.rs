//! Error types for source loading.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CSV from {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse JSON from {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported input format `{extension}` for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("JSON source {path} must contain an array of grant records")]
    NotAnArray { path: PathBuf },
}
