#![deny(unsafe_code)]

use std::path::Path;

use serde_json::Value;
use sha2::Digest;
use tracing::debug;

use grantid_model::{RawRecord, RecordId};

use crate::IngestOptions;
use crate::error::IngestError;

pub(crate) fn derive_record_id(source_id: &str, record_number: u64) -> RecordId {
    // Deterministic: sha256("<source_id>\0<record_number>") and take first 16 bytes.
    let mut hasher = sha2::Sha256::new();
    hasher.update(source_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(record_number.to_string().as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    RecordId::from_first_16_bytes_of_sha256(digest)
}

/// Read a header-row CSV file into raw records.
///
/// Cells are trimmed; empty cells are omitted from the record so a missing
/// value and a blank value look the same to the mapping rules.
pub fn read_csv_records(
    path: &Path,
    options: &IngestOptions,
) -> Result<Vec<RawRecord>, IngestError> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(csv_error)?;
        let record_number = (idx as u64) + 1;

        let mut values = serde_json::Map::new();
        for (header, value) in headers.iter().zip(row.iter()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            values.insert(header.to_string(), Value::String(value.to_string()));
        }

        records.push(RawRecord::new(
            derive_record_id(&options.source_id, record_number),
            record_number,
            values,
        ));
    }
    debug!(path = %path.display(), count = records.len(), "read records from CSV");
    Ok(records)
}
