//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Table;
use tracing::{info, info_span, warn};

use grantid_core::{PipelineInput, run_pipeline};
use grantid_ingest::{IngestOptions, read_records};
use grantid_map::Config;
use grantid_output::write_document_file;

use crate::cli::ConvertArgs;
use crate::summary::apply_table_style;
use crate::types::ConvertResult;

/// Run the conversion pipeline end to end.
///
/// Configuration errors and unreadable primary inputs are fatal; a
/// secondary related-works file that fails to load is only a warning, and
/// per-record failures never fail the run.
pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert", input = %args.input.display());
    let _guard = span.enter();

    let config = Config::load(&args.config).context("load configuration")?;

    let records =
        read_records(&args.input, &ingest_options(&args.input, &config)).context("read input data")?;
    info!(records = records.len(), "input loaded");

    let mut related_works = Vec::new();
    for path in &args.related_works {
        match read_records(path, &ingest_options(path, &config)) {
            Ok(mut loaded) => {
                info!(path = %path.display(), records = loaded.len(), "related works loaded");
                related_works.append(&mut loaded);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to load related works");
            }
        }
    }

    let coapplicants = match &args.coapplicants {
        Some(path) => read_records(path, &ingest_options(path, &config))
            .context("read co-applicant data")?,
        None => Vec::new(),
    };

    let records_read = records.len();
    let timestamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
    let output = run_pipeline(PipelineInput {
        config: &config,
        records,
        related_works,
        coapplicants,
        timestamp,
    });

    let written = if args.dry_run {
        info!("dry run, output not written");
        None
    } else {
        write_document_file(&args.output, &output.document).context("write output document")?;
        info!(path = %args.output.display(), "output written");
        Some(args.output.clone())
    };

    Ok(ConvertResult {
        output: written,
        records_read,
        grants: output.document.grants.len(),
        report: output.report,
    })
}

fn ingest_options(path: &Path, config: &Config) -> IngestOptions {
    IngestOptions::new(path.display().to_string())
        .with_json_root_path(config.options.json_root_path.clone())
}

/// List the supported transforms and their options.
pub fn run_transforms() {
    let mut table = Table::new();
    table.set_header(vec!["Transform", "Options", "Description"]);
    apply_table_style(&mut table);
    table.add_row(vec![
        "split_name",
        "separator",
        "Split a combined name into family and given parts",
    ]);
    table.add_row(vec![
        "construct_doi",
        "prefix (required)",
        "Prefix-concatenate a DOI from a source value",
    ]);
    table.add_row(vec![
        "construct_url",
        "prefix (required)",
        "Prefix-concatenate a resource URL from a source value",
    ]);
    table.add_row(vec![
        "format_date",
        "input_format, output_format",
        "Re-render a date between strftime formats",
    ]);
    println!("{table}");
}
