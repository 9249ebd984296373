//! CLI argument definitions for the grant converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "grantid",
    version,
    about = "Grant Registration Studio - Convert funder grant records to Crossref Grant ID XML",
    long_about = "Convert funder grant records to the Crossref Grant ID XML format.\n\n\
                  Reads CSV or JSON grant data plus a YAML mapping configuration and\n\
                  writes a schema-shaped doi_batch document. Related works and\n\
                  co-applicants can be joined in from secondary files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a grant dataset to a Grant ID XML document.
    Convert(ConvertArgs),

    /// List the supported field transforms.
    Transforms,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the source data file (CSV or JSON).
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Path to the YAML mapping configuration.
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,

    /// Path for the generated XML document.
    #[arg(long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Related-works data file(s), joined onto grants by the configured key.
    /// May be given multiple times.
    #[arg(long = "related-works", value_name = "FILE")]
    pub related_works: Vec<PathBuf>,

    /// Co-applicant data file, joined onto grants by the configured key.
    #[arg(long = "coapplicants", value_name = "FILE")]
    pub coapplicants: Option<PathBuf>,

    /// Assemble and report without writing the output document.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
