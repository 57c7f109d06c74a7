//! Resolve command - Insert unknown modifiers until the test command passes.

use std::path::Path;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, ResolveRunSummary};
use crate::{
    cli::{args::ResolveCommand, report},
    config::load_config,
    resolve::{ResolveOptions, resolve as run_resolve},
};

pub fn resolve(cmd: ResolveCommand, cwd: &Path) -> Result<CommandResult> {
    let loaded = load_config(cwd)?;
    loaded.config.validate_resolve()?;
    let source = match &cmd.source {
        Some(source) => cwd.join(source),
        None => loaded.resolve(&loaded.config.source_file),
    };
    let max_rounds = match cmd.max_rounds {
        Some(rounds) => usize::try_from(rounds).context("--max-rounds is too large")?,
        None => loaded.config.max_rounds,
    };
    let options = ResolveOptions {
        test: cmd.test.to_command(&loaded),
        source: source.clone(),
        header_lines: cmd
            .header_lines
            .unwrap_or(loaded.config.insert_header_lines),
        max_rounds,
    };

    let verbose = cmd.common.verbose;
    let summary = run_resolve(&options, |entry| report::print_resolved(entry, verbose))
        .with_context(|| format!("Failed to resolve unknown modifiers in {}", source.display()))?;

    Ok(CommandResult::success(CommandSummary::Resolve(
        ResolveRunSummary { source, summary },
    )))
}
