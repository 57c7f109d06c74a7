//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `correct`: Rewrite localisation strings from the corrections CSV (default)
//! - `insert`: Insert a line into the generated table at its sorted position
//! - `extract`: Run the test command and show the unknown modifier it reports
//! - `resolve`: Repeat extract + insert until the test command passes
//! - `init`: Initialize locfix configuration file

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{Args, Parser, Subcommand};

use crate::{command::TestCommand, config::ConfigLoadResult};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// The command to run. Without one, locfix applies the corrections CSV.
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Correct(CorrectCommand::default()))
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Correct(cmd)) => cmd.args.common.verbose,
            Some(Command::Insert(cmd)) => cmd.args.common.verbose,
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments of commands that rewrite the generated source file.
#[derive(Debug, Clone, Default, Args)]
pub struct RewriteArgs {
    /// Generated source file (overrides config file)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Write the result to this file instead of replacing the source file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of leading lines that are never modified (overrides config file)
    #[arg(long, value_name = "N")]
    pub header_lines: Option<usize>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RewriteArgs {
    pub fn source_path(&self, loaded: &ConfigLoadResult) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| loaded.resolve(&loaded.config.source_file))
    }

    pub fn target_path(&self, source: &Path) -> PathBuf {
        self.output.clone().unwrap_or_else(|| source.to_path_buf())
    }
}

/// Overrides for the external test command.
#[derive(Debug, Clone, Default, Args)]
pub struct TestArgs {
    /// Test command to run through the shell (overrides config file)
    #[arg(long = "command", value_name = "CMD")]
    pub test_command: Option<String>,

    /// Kill the test command after this many seconds (overrides config file)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

impl TestArgs {
    /// The configured test command with these overrides applied.
    ///
    /// The command runs in the directory of the config file.
    pub fn to_command(&self, loaded: &ConfigLoadResult) -> TestCommand {
        let mut command = loaded.config.test.to_command(&loaded.base_dir);
        if let Some(test_command) = &self.test_command {
            command.command = test_command.clone();
        }
        if let Some(secs) = self.timeout {
            command.timeout = Some(Duration::from_secs(secs));
        }
        command
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CorrectCommand {
    /// Corrections CSV: `id;"incorrect";"corrected"` (overrides config file)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    #[command(flatten)]
    pub args: RewriteArgs,
}

#[derive(Debug, Clone, Args)]
pub struct InsertCommand {
    /// Line to insert, including its indentation
    #[arg(allow_hyphen_values = true)]
    pub line: String,

    /// Append the line at the end when no existing line sorts after it
    #[arg(long)]
    pub append_at_eof: bool,

    #[command(flatten)]
    pub args: RewriteArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub test: TestArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ResolveCommand {
    /// Generated source file (overrides config file)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Number of leading lines that are never modified (overrides config file)
    #[arg(long, value_name = "N")]
    pub header_lines: Option<usize>,

    /// Give up after this many insertions (overrides config file)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_rounds: Option<u64>,

    #[command(flatten)]
    pub test: TestArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace incorrect localisation strings listed in the corrections CSV
    Correct(CorrectCommand),
    /// Insert a line into the generated table at its sorted position
    Insert(InsertCommand),
    /// Run the test command and extract the unknown modifier it reports
    Extract(ExtractCommand),
    /// Run the test command and insert reported modifiers until it passes
    Resolve(ResolveCommand),
    /// Initialize a new .locfixrc.json configuration file
    Init,
}
