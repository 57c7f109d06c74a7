//! Error type shared by the library operations.
//!
//! The CLI layer wraps these in `anyhow` with additional context; the library
//! keeps them typed so callers can react to specific failure kinds.

use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The test command kept failing when no further action was possible.
    #[error("test command failed ({}): {diagnostic}", describe_code(.code))]
    ExternalCommandFailed {
        code: Option<i32>,
        diagnostic: String,
    },

    #[error("test command `{command}` timed out after {}s", .timeout.as_secs())]
    CommandTimedOut { command: String, timeout: Duration },

    /// A failed test run without a recognisable report.
    #[error("malformed test output: {reason}{output}")]
    MalformedTestOutput {
        reason: String,
        /// Exit status and output tail of the run; empty when only text was parsed.
        output: String,
    },

    #[error("{}: row {row} has {fields} field(s), expected at least 3", .path.display())]
    MalformedCsvRow {
        path: PathBuf,
        row: usize,
        fields: usize,
    },

    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No line after the header sorts after the line being inserted.
    #[error("{}: no line sorts after {line:?}, nothing was inserted", .path.display())]
    NoInsertionPoint { path: PathBuf, line: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path it happened on.
    ///
    /// `NotFound` is reported as [`Error::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound(path)
        } else {
            Error::Io { path, source }
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedTestOutput {
            reason: reason.into(),
            output: String::new(),
        }
    }
}

pub(crate) fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
