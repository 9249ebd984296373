#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// A record dropped from the batch, with enough context to find it in the
/// source again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub record_number: u64,
    pub record_id: String,
    pub reason: String,
}

/// A field omitted from an otherwise assembled record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWarning {
    pub record_number: u64,
    pub field: String,
    pub message: String,
}

/// Accumulated outcome of one batch run. Per-record and per-field failures
/// land here instead of unwinding the batch loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub processed: usize,
    pub skipped: Vec<SkippedRecord>,
    pub field_warnings: Vec<FieldWarning>,
}

impl RunReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn total_records(&self) -> usize {
        self.processed + self.skipped.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty() || !self.field_warnings.is_empty()
    }
}
