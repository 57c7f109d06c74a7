//! Running the external test command.
//!
//! The command string goes through the platform shell. Environment variables
//! from [`TestCommand::env`] are set on the child only; the current process
//! environment is never modified.

use std::{collections::BTreeMap, path::PathBuf, process::Stdio, time::Duration};

use tokio::{process::Command, runtime, time};

use crate::error::{Error, Result};

/// Lines of each captured stream kept in diagnostics.
const OUTPUT_TAIL_LINES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCommand {
    pub command: String,
    pub env: BTreeMap<String, String>,
    pub working_dir: Option<PathBuf>,
    /// `None` waits forever.
    pub timeout: Option<Duration>,
}

impl TestCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            env: BTreeMap::new(),
            working_dir: None,
            timeout: None,
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn shell(&self) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        cmd.arg(&self.command);
        cmd.envs(&self.env);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl TestFailure {
    /// The last lines of stdout and stderr, one `--- name ---` section per
    /// non-empty stream. Each section starts with a newline.
    pub fn output_tail(&self) -> String {
        [("stdout", &self.stdout), ("stderr", &self.stderr)]
            .into_iter()
            .filter_map(|(name, text)| {
                let lines: Vec<&str> = text.trim_end().lines().collect();
                if lines.iter().all(|line| line.trim().is_empty()) {
                    return None;
                }
                let tail = &lines[lines.len().saturating_sub(OUTPUT_TAIL_LINES)..];
                Some(format!("\n--- {} ---\n{}", name, tail.join("\n")))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestRun {
    Passed,
    Failed(TestFailure),
}

/// Run the command to completion, or until its timeout expires.
///
/// The timeout covers the whole run, including reading the output, so a
/// background process that keeps the pipes open cannot stall the caller.
pub fn run(test: &TestCommand) -> Result<TestRun> {
    runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::io(&test.command, e))?
        .block_on(run_async(test))
}

async fn run_async(test: &TestCommand) -> Result<TestRun> {
    let child = test
        .shell()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::io(&test.command, e))?;

    // Dropping the pending future on timeout drops the child, which kills it.
    let output = match test.timeout {
        Some(limit) => time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| Error::CommandTimedOut {
                command: test.command.clone(),
                timeout: limit,
            })?,
        None => child.wait_with_output().await,
    }
    .map_err(|e| Error::io(&test.command, e))?;

    if output.status.success() {
        Ok(TestRun::Passed)
    } else {
        Ok(TestRun::Failed(TestFailure {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }))
    }
}
