use std::env;

use anyhow::{Context, Result};

use super::{
    args::Command,
    commands::{
        CommandResult, correct::correct, extract::extract, init::init, insert::insert,
        resolve::resolve,
    },
};

pub fn run(command: Command) -> Result<CommandResult> {
    let cwd = env::current_dir().context("Failed to get current directory")?;

    match command {
        Command::Correct(cmd) => correct(cmd, &cwd),
        Command::Insert(cmd) => insert(cmd, &cwd),
        Command::Extract(cmd) => extract(cmd, &cwd),
        Command::Resolve(cmd) => resolve(cmd, &cwd),
        Command::Init => init(&cwd),
    }
}
