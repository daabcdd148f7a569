//! Result types shared between commands and summary printing.

use std::path::PathBuf;

/// Outcome of a `convert` run.
#[derive(Debug)]
pub struct ConvertResult {
    pub output_dir: PathBuf,
    pub instruments: Vec<InstrumentSummary>,
    /// Category ids that own fields but could not head an instrument:
    /// no category record, or a record whose title fails validation.
    pub skipped: Vec<String>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct InstrumentSummary {
    pub category_id: String,
    pub title: String,
    pub table_name: String,
    pub field_count: usize,
    pub line_count: usize,
    pub path: Option<PathBuf>,
}

/// Outcome of a `check` run.
#[derive(Debug)]
pub struct CheckResult {
    pub indexed: usize,
    pub missing: Vec<PathBuf>,
}

impl CheckResult {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
