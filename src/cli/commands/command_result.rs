use std::path::PathBuf;

use crate::{
    correct::CorrectionReport, extract::ExtractOutcome, insert::InsertOutcome,
    resolve::ResolveSummary,
};

#[derive(Debug)]
pub enum CommandSummary {
    Correct(CorrectSummary),
    Insert(InsertSummary),
    Extract(ExtractSummary),
    Resolve(ResolveRunSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CorrectSummary {
    pub csv: PathBuf,
    pub source: PathBuf,
    pub target: PathBuf,
    /// Number of distinct ids loaded from the CSV.
    pub entries: usize,
    pub is_apply: bool,
    pub report: CorrectionReport,
}

#[derive(Debug)]
pub struct InsertSummary {
    pub source: PathBuf,
    pub target: PathBuf,
    pub line: String,
    pub is_apply: bool,
    pub outcome: InsertOutcome,
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub command: String,
    pub outcome: ExtractOutcome,
}

#[derive(Debug)]
pub struct ResolveRunSummary {
    pub source: PathBuf,
    pub summary: ResolveSummary,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running locfix commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Findings that make the command exit with status 1, e.g. failing tests.
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
}

impl CommandResult {
    pub fn success(summary: CommandSummary) -> Self {
        Self {
            summary,
            error_count: 0,
            warning_count: 0,
            exit_on_errors: true,
        }
    }
}
