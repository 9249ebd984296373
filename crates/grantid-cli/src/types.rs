use std::path::PathBuf;

use grantid_model::RunReport;

/// Outcome of one `convert` invocation.
#[derive(Debug)]
pub struct ConvertResult {
    /// Path the document was written to; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub records_read: usize,
    pub grants: usize,
    pub report: RunReport,
}
