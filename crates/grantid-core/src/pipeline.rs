//! The sequential batch loop.
//!
//! Join indexes are built once, before the first record is assembled, and
//! stay read-only afterwards. Each record is a `Result` on its own: a
//! failure is logged, counted, and skipped without unwinding the batch.

use tracing::{info, warn};

use grantid_map::{Config, RelatedWorksConfig};
use grantid_model::{Document, RawRecord, RunReport, SkippedRecord};

use crate::assembler::{JoinIndexes, assemble_grant};
use crate::coapplicants::build_coapplicant_index;
use crate::document::build_document;
use crate::related_works::build_related_works_index;

/// Everything one batch run needs. Secondary sources are already loaded;
/// the pipeline itself performs no I/O.
pub struct PipelineInput<'a> {
    pub config: &'a Config,
    pub records: Vec<RawRecord>,
    pub related_works: Vec<RawRecord>,
    pub coapplicants: Vec<RawRecord>,
    /// Head timestamp, supplied by the host so runs are reproducible.
    pub timestamp: String,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub document: Document,
    pub report: RunReport,
}

/// Run the batch. The output grant order equals the input order of the
/// records that assembled successfully.
pub fn run_pipeline(input: PipelineInput<'_>) -> PipelineOutput {
    let indexes = build_indexes(&input);

    let mut grants = Vec::with_capacity(input.records.len());
    let mut report = RunReport::default();
    for record in input.records {
        match assemble_grant(&record, input.config, &indexes) {
            Ok(output) => {
                report.processed += 1;
                report.field_warnings.extend(output.warnings);
                grants.push(output.grant);
            }
            Err(error) => {
                warn!(
                    record = record.number(),
                    id = %record.id(),
                    %error,
                    "skipping record"
                );
                report.skipped.push(SkippedRecord {
                    record_number: record.number(),
                    record_id: record.id().to_hex(),
                    reason: error.to_string(),
                });
            }
        }
    }
    info!(
        processed = report.processed,
        skipped = report.skipped.len(),
        "batch assembled"
    );

    let document = build_document(input.config, &input.timestamp, grants);
    PipelineOutput { document, report }
}

fn build_indexes(input: &PipelineInput<'_>) -> JoinIndexes {
    let related_works = match &input.config.related_works {
        Some(RelatedWorksConfig::ExternalJoin(join)) => {
            Some(build_related_works_index(&input.related_works, join))
        }
        _ => None,
    };
    let coapplicants = input
        .config
        .coapplicants
        .as_ref()
        .map(|config| build_coapplicant_index(&input.coapplicants, config));
    JoinIndexes {
        related_works,
        coapplicants,
    }
}
