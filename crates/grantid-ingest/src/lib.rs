#![deny(unsafe_code)]

//! Grant data ingestion.
//!
//! Loads a tabular (CSV) or hierarchical (JSON) source into an ordered
//! sequence of [`RawRecord`]s. The format is chosen by file extension, the
//! way the host CLI's inputs are named. Records carry deterministic ids so
//! diagnostics from repeated runs line up.

use std::path::Path;

use grantid_model::RawRecord;

mod csv_ingest;
pub mod error;
mod json_ingest;

pub use csv_ingest::read_csv_records;
pub use error::IngestError;
pub use json_ingest::read_json_records;

/// Options shared by all loaders.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Stable source identifier for record-id derivation (e.g. the input
    /// path as given on the command line).
    pub source_id: String,
    /// Dotted path to the record array inside a hierarchical source.
    pub json_root_path: Option<String>,
}

impl IngestOptions {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            json_root_path: None,
        }
    }

    #[must_use]
    pub fn with_json_root_path(mut self, path: Option<String>) -> Self {
        self.json_root_path = path;
        self
    }
}

/// Read all records from a source file, dispatching on its extension.
pub fn read_records(path: &Path, options: &IngestOptions) -> Result<Vec<RawRecord>, IngestError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => read_csv_records(path, options),
        "json" => read_json_records(path, options),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}
