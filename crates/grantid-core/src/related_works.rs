//! Related-work resolution: external file join or embedded-array extraction.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use grantid_map::{EmbeddedConfig, ExternalJoinConfig, RelatedWorksConfig};
use grantid_model::{RawRecord, RelatedWork, RelatedWorkId, scalar_to_string};
use grantid_transform::{extract_doi_from_url, normalize_doi};

/// One-to-many index over the secondary related-works source. Every record
/// sharing a join key contributes, in source order.
pub type RelatedWorksIndex = BTreeMap<String, Vec<RawRecord>>;

/// Build the join index once, before the batch starts. Secondary records
/// without a join value are dropped.
pub fn build_related_works_index(
    records: &[RawRecord],
    config: &ExternalJoinConfig,
) -> RelatedWorksIndex {
    let mut index = RelatedWorksIndex::new();
    for record in records {
        if let Some(key) = record.get_str(&config.join_key) {
            index.entry(key).or_default().push(record.clone());
        }
    }
    index
}

/// Resolve the related works for one grant record. A missing index, a join
/// miss, or an absent embedded array all yield an empty sequence, never an
/// error.
///
/// `award_number` is the fallback join value when no `grant_join_field` is
/// configured.
pub fn resolve_related_works(
    record: &RawRecord,
    config: &RelatedWorksConfig,
    index: Option<&RelatedWorksIndex>,
    award_number: Option<&str>,
) -> Vec<RelatedWork> {
    match config {
        RelatedWorksConfig::ExternalJoin(join) => {
            resolve_external(record, join, index, award_number)
        }
        RelatedWorksConfig::Embedded(embedded) => resolve_embedded(record, embedded),
    }
}

fn resolve_external(
    record: &RawRecord,
    join: &ExternalJoinConfig,
    index: Option<&RelatedWorksIndex>,
    award_number: Option<&str>,
) -> Vec<RelatedWork> {
    let Some(index) = index else {
        return Vec::new();
    };
    let join_value = match &join.grant_join_field {
        Some(field) => record.get_str(field),
        None => award_number.map(str::to_string),
    };
    let Some(join_value) = join_value else {
        return Vec::new();
    };
    let Some(matches) = index.get(&join_value) else {
        return Vec::new();
    };

    let mut works = Vec::new();
    for secondary in matches {
        if let Some(doi) = secondary.get_str("doi") {
            works.push(RelatedWork {
                relationship_type: join.relationship_type.clone(),
                identifier: RelatedWorkId::Doi(normalize_doi(&doi)),
            });
        } else if let Some(uri) = secondary.get_str("openalex_work_id") {
            works.push(RelatedWork {
                relationship_type: join.relationship_type.clone(),
                identifier: RelatedWorkId::Uri(uri),
            });
        } else {
            debug!(
                record = secondary.number(),
                "related work carries neither a doi nor a work id"
            );
        }
    }
    works
}

fn resolve_embedded(record: &RawRecord, config: &EmbeddedConfig) -> Vec<RelatedWork> {
    let Some(entries) = record.get_array(&config.embedded_field) else {
        return Vec::new();
    };
    let mut works = Vec::new();
    for entry in entries {
        let Some(value) = entry_str(entry, &config.doi_field) else {
            continue;
        };
        if let Some(pattern) = &config.filter_pattern {
            if !pattern.is_match(&value) {
                continue;
            }
        }
        match extract_doi_from_url(&value) {
            Some(doi) => works.push(RelatedWork {
                relationship_type: config.relationship_type.clone(),
                identifier: RelatedWorkId::Doi(doi),
            }),
            None => debug!(
                record = record.number(),
                field = %config.doi_field,
                "embedded related work has no doi.org path"
            ),
        }
    }
    works
}

fn entry_str(entry: &Value, key: &str) -> Option<String> {
    scalar_to_string(entry.get(key)?)
}
