//! Insert command - Add one entry to the generated table.

use std::path::Path;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InsertSummary};
use crate::{
    atomic::WriteMode,
    cli::args::InsertCommand,
    config::load_config,
    insert::{InsertOptions, insert_file},
};

pub fn insert(cmd: InsertCommand, cwd: &Path) -> Result<CommandResult> {
    let loaded = load_config(cwd)?;
    let args = &cmd.args;

    let source = cwd.join(args.source_path(&loaded));
    let target = cwd.join(args.target_path(&source));
    let mode = WriteMode::from_dry_run(args.dry_run);
    let options = InsertOptions {
        line: cmd.line,
        header_lines: args
            .header_lines
            .unwrap_or(loaded.config.insert_header_lines),
        append_at_eof: cmd.append_at_eof,
    };

    let outcome = insert_file(&source, &target, &options, mode)
        .with_context(|| format!("Failed to insert into {}", source.display()))?;

    let mut result = CommandResult::success(CommandSummary::Insert(InsertSummary {
        source,
        target,
        line: options.line,
        is_apply: mode.is_apply(),
        outcome,
    }));
    if !outcome.is_inserted() {
        result.warning_count += 1;
    }
    Ok(result)
}
