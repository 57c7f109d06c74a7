//! Repeated test → extract → insert loop.
//!
//! Each round runs the test command. A passing run ends the loop; a failing
//! run names one unknown modifier, whose table entry is inserted into the
//! source file before the next round.

use std::path::PathBuf;

use crate::{
    atomic::WriteMode,
    command::TestCommand,
    error::{Error, Result},
    extract::{ExtractOutcome, Extraction, extract},
    insert::{InsertOptions, InsertOutcome, insert_file},
};

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub test: TestCommand,
    pub source: PathBuf,
    pub header_lines: usize,
    pub max_rounds: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub extraction: Extraction,
    pub line_number: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// Number of times the test command ran.
    pub rounds: usize,
    pub inserted: Vec<ResolvedEntry>,
}

/// Run rounds until the tests pass or `max_rounds` is exhausted.
///
/// `on_insert` is called after each successful insertion.
pub fn resolve<F>(options: &ResolveOptions, mut on_insert: F) -> Result<ResolveSummary>
where
    F: FnMut(&ResolvedEntry),
{
    let mut summary = ResolveSummary::default();

    loop {
        summary.rounds += 1;
        let (failure, extraction) = match extract(&options.test)? {
            ExtractOutcome::Passed => return Ok(summary),
            ExtractOutcome::Failed {
                failure,
                extraction,
            } => (failure, extraction),
        };

        if summary.rounds > options.max_rounds {
            return Err(Error::ExternalCommandFailed {
                code: failure.code,
                diagnostic: format!(
                    "still failing after {} insertion round(s), last unknown modifier: {}{}",
                    options.max_rounds,
                    extraction.identifier,
                    failure.output_tail()
                ),
            });
        }

        let insert = InsertOptions {
            line: extraction.line(),
            header_lines: options.header_lines,
            append_at_eof: false,
        };
        let line_number =
            match insert_file(&options.source, &options.source, &insert, WriteMode::Apply)? {
                InsertOutcome::Inserted { line_number }
                | InsertOutcome::Appended { line_number } => line_number,
                InsertOutcome::NoInsertionPoint => {
                    return Err(Error::NoInsertionPoint {
                        path: options.source.clone(),
                        line: insert.line,
                    });
                }
            };

        let entry = ResolvedEntry {
            extraction,
            line_number,
        };
        on_insert(&entry);
        summary.inserted.push(entry);
    }
}
