//! Command-line interface layer.
//!
//! Parses arguments, dispatches to the command implementations in
//! [`commands`], prints the result and maps it to an exit status.

use std::process::ExitCode;

use anyhow::Result;

pub mod args;
pub mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let result = run::run(args.into_command())?;
    report::print(&result, verbose);

    Ok(ExitStatus::from_result(&result).into())
}
