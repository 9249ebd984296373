#![deny(unsafe_code)]

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use grantid_model::RawRecord;

use crate::IngestOptions;
use crate::csv_ingest::derive_record_id;
use crate::error::IngestError;

/// Read a hierarchical JSON source into raw records.
///
/// When `json_root_path` is configured, the loader descends through nested
/// objects along the dotted path before expecting the record array; a
/// missing path segment yields an empty batch rather than an error. Array
/// elements that are not objects are skipped with a warning but still take
/// up a record number.
pub fn read_json_records(
    path: &Path,
    options: &IngestOptions,
) -> Result<Vec<RawRecord>, IngestError> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut data: Value = serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(root) = &options.json_root_path {
        for key in root.split('.') {
            data = match data {
                Value::Object(mut map) => map.remove(key).unwrap_or(Value::Array(Vec::new())),
                _ => Value::Array(Vec::new()),
            };
        }
    }

    let Value::Array(items) = data else {
        return Err(IngestError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let record_number = (idx as u64) + 1;
        match item {
            Value::Object(map) => records.push(RawRecord::new(
                derive_record_id(&options.source_id, record_number),
                record_number,
                map,
            )),
            _ => warn!(
                path = %path.display(),
                record = record_number,
                "skipping non-object record in JSON source"
            ),
        }
    }
    debug!(path = %path.display(), count = records.len(), "read records from JSON");
    Ok(records)
}
