//! Correct command - Replace incorrect localisation strings.
//!
//! Loads the corrections CSV and rewrites every line of the generated source
//! file whose first quoted literal is a known id. Runs in place by default;
//! `--output` writes elsewhere and `--dry-run` writes nothing.

use std::path::Path;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, CorrectSummary};
use crate::{
    atomic::WriteMode,
    cli::args::CorrectCommand,
    config::load_config,
    correct::correct_file,
    corrections::CorrectionTable,
};

pub fn correct(cmd: CorrectCommand, cwd: &Path) -> Result<CommandResult> {
    let loaded = load_config(cwd)?;
    let args = &cmd.args;

    let csv = match &cmd.csv {
        Some(csv) => cwd.join(csv),
        None => loaded.resolve(&loaded.config.corrections_csv),
    };
    let source = cwd.join(args.source_path(&loaded));
    let target = cwd.join(args.target_path(&source));
    let header_lines = args
        .header_lines
        .unwrap_or(loaded.config.correct_header_lines);
    let mode = WriteMode::from_dry_run(args.dry_run);

    let table = CorrectionTable::load(&csv).context("Failed to load corrections")?;
    let report = correct_file(&source, &target, &table, header_lines, mode)
        .context("Failed to correct localisation strings")?;

    Ok(CommandResult::success(CommandSummary::Correct(
        CorrectSummary {
            csv,
            source,
            target,
            entries: table.len(),
            is_apply: mode.is_apply(),
            report,
        },
    )))
}
