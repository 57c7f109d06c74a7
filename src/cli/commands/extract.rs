//! Extract command - Show the modifier the failing test does not know.

use std::path::Path;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::{
    cli::args::ExtractCommand,
    config::load_config,
    extract::{ExtractOutcome, extract as run_extract},
};

pub fn extract(cmd: ExtractCommand, cwd: &Path) -> Result<CommandResult> {
    let loaded = load_config(cwd)?;
    loaded.config.test.validate()?;
    let test = cmd.test.to_command(&loaded);

    let outcome = run_extract(&test).context("Failed to extract unknown modifier")?;
    let failed = matches!(outcome, ExtractOutcome::Failed { .. });

    let mut result = CommandResult::success(CommandSummary::Extract(ExtractSummary {
        command: test.command,
        outcome,
    }));
    if failed {
        result.error_count += 1;
    }
    Ok(result)
}
