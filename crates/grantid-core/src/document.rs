//! Final document aggregation.

use grantid_map::Config;
use grantid_model::{Document, DocumentHead, Grant};

/// Combine the configured header values, the supplied timestamp, and the
/// assembled grants into the output document.
///
/// The timestamp is injected by the caller so repeated runs over identical
/// inputs can be compared byte for byte. Pure aggregation: the only logic
/// here is fallbacks for optional header values.
pub fn build_document(config: &Config, timestamp: &str, grants: Vec<Grant>) -> Document {
    let header = &config.header_static_values;
    let registrant = header
        .registrant
        .clone()
        .or_else(|| header.depositor_name.clone())
        .unwrap_or_else(|| "Unknown Registrant".to_string());
    Document {
        head: DocumentHead {
            batch_id: header
                .doi_batch_id
                .clone()
                .unwrap_or_else(|| format!("batch_{timestamp}")),
            timestamp: timestamp.to_string(),
            depositor_name: header.depositor_name.clone().unwrap_or_default(),
            depositor_email: header.depositor_email.clone().unwrap_or_default(),
            registrant,
        },
        namespaces: config.namespace_values.clone(),
        grants,
    }
}
