#![deny(unsafe_code)]

use serde_json::Value;

use crate::RecordId;

/// One raw input row or object, as produced by the ingest layer.
///
/// Values are kept as loaded: tabular sources yield string scalars keyed by
/// header, hierarchical sources may carry nested objects and arrays. A record
/// is immutable once built and is consumed exactly once by the assembler.
#[derive(Debug, Clone)]
pub struct RawRecord {
    id: RecordId,
    number: u64,
    values: serde_json::Map<String, Value>,
}

impl RawRecord {
    pub fn new(id: RecordId, number: u64, values: serde_json::Map<String, Value>) -> Self {
        Self { id, number, values }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// 1-based position of the record in its source.
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a field, resolving dotted paths (`"a.b.c"`) through nested
    /// objects. A field whose literal name contains dots wins over path
    /// descent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        if field.is_empty() {
            return None;
        }
        if let Some(value) = self.values.get(field) {
            return Some(value);
        }
        let mut current: Option<&Value> = None;
        for key in field.split('.') {
            current = match current {
                None => self.values.get(key),
                Some(Value::Object(map)) => map.get(key),
                Some(_) => return None,
            };
            current?;
        }
        current
    }

    /// Scalar rendering of a field: strings are trimmed, numbers and booleans
    /// are rendered as text. Absent fields, nulls, empty strings, and
    /// non-scalar values yield `None`.
    pub fn get_str(&self, field: &str) -> Option<String> {
        scalar_to_string(self.get(field)?)
    }

    pub fn get_array(&self, field: &str) -> Option<&Vec<Value>> {
        match self.get(field)? {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Render a scalar JSON value as text. Nulls, empty strings, and containers
/// have no scalar rendering.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
