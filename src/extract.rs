//! Test-output extraction.
//!
//! When the modifier parsing test meets a modifier missing from the generated
//! table it fails with a report that contains the indented table entry it
//! was working on followed by `UNKNOWN <identifier>\n` (the `\n` is the
//! two-character escape from the JSON test output, not a newline).
//!
//! The report is read with two small grammars:
//!
//! ```text
//! report   := before "UNKNOWN " identifier "\n"
//! before   := any* indent fragment tail
//! indent   := "    "            (the last one that leaves room for the tail)
//! tail     := any{4}
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    command::{self, TestCommand, TestFailure, TestRun},
    error::{Error, Result, describe_code},
};

pub const MARKER: &str = "UNKNOWN ";

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A(?P<identifier>[^\n]*?)\\n").unwrap());

static FRAGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A.*(?P<indent> {4})(?P<fragment>.*)(?P<tail>.{4})\z").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Indentation preceding the fragment in the report.
    pub indent: String,
    /// Source fragment with escape backslashes removed.
    pub fragment: String,
    /// The modifier the test did not recognise.
    pub identifier: String,
}

impl Extraction {
    /// The indented line to insert into the generated table.
    pub fn line(&self) -> String {
        format!("{}{}", self.indent, self.fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Passed,
    Failed {
        failure: TestFailure,
        extraction: Extraction,
    },
}

/// Parse the standard output of a failed test run.
pub fn parse_failure(output: &str) -> Result<Extraction> {
    let Some((before, after)) = output.split_once(MARKER) else {
        return Err(Error::malformed(format!("marker {:?} not found", MARKER)));
    };

    let report = IDENTIFIER_REGEX.captures(after).ok_or_else(|| {
        Error::malformed(format!(
            "no \\n terminator after {:?} on the same line",
            MARKER
        ))
    })?;
    let identifier = report["identifier"].trim_end_matches('\r');
    if identifier.is_empty() {
        return Err(Error::malformed(format!(
            "empty identifier after {:?}",
            MARKER
        )));
    }

    let fragment = FRAGMENT_REGEX.captures(before).ok_or_else(|| {
        Error::malformed(format!(
            "no four-space indented fragment before {:?}",
            MARKER
        ))
    })?;

    Ok(Extraction {
        indent: fragment["indent"].to_string(),
        fragment: fragment["fragment"].replace('\\', ""),
        identifier: identifier.to_string(),
    })
}

/// Run the test command and extract the unknown modifier if it fails.
///
/// A failure without a report keeps the exit status and the tail of the
/// captured output in the error.
pub fn extract(test: &TestCommand) -> Result<ExtractOutcome> {
    let failure = match command::run(test)? {
        TestRun::Passed => return Ok(ExtractOutcome::Passed),
        TestRun::Failed(failure) => failure,
    };

    match parse_failure(&failure.stdout) {
        Ok(extraction) => Ok(ExtractOutcome::Failed {
            failure,
            extraction,
        }),
        Err(Error::MalformedTestOutput { reason, .. }) => Err(Error::MalformedTestOutput {
            reason,
            output: format!(" ({}){}", describe_code(&failure.code), failure.output_tail()),
        }),
        Err(err) => Err(err),
    }
}
