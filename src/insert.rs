//! Sorted line insertion.
//!
//! The generated modifier table is kept in lexicographic order below its
//! header. A new entry is written directly before the first existing line that
//! sorts after it; every other line is copied unchanged.

use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use crate::{
    atomic::{WriteMode, rewrite},
    error::Result,
    utils::{copy_lines, split_terminator},
};

#[derive(Debug, Clone)]
pub struct InsertOptions {
    /// Line to insert, without terminator.
    pub line: String,
    pub header_lines: usize,
    /// Append the line at the end when no existing line sorts after it.
    pub append_at_eof: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Inserted as this 1-based line of the output.
    Inserted { line_number: usize },
    /// No existing line sorts after the new one; appended at the end.
    Appended { line_number: usize },
    /// No existing line sorts after the new one; the output equals the input.
    NoInsertionPoint,
}

impl InsertOutcome {
    pub fn is_inserted(self) -> bool {
        !matches!(self, InsertOutcome::NoInsertionPoint)
    }
}

pub fn insert_lines<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    options: &InsertOptions,
) -> io::Result<InsertOutcome> {
    let mut lines_written = copy_lines(reader, writer, options.header_lines)?;
    let mut outcome = None;
    // Terminator of the last line read, used when appending.
    let mut last_terminator = String::from("\n");

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let (content, terminator) = split_terminator(&line);
        // Terminator excluded: a line equal to the new one is not greater,
        // so the new line goes after its duplicates.
        if outcome.is_none() && content > options.line.as_str() {
            writeln!(writer, "{}", options.line)?;
            lines_written += 1;
            outcome = Some(InsertOutcome::Inserted {
                line_number: lines_written,
            });
        }
        writer.write_all(line.as_bytes())?;
        lines_written += 1;
        last_terminator = terminator.to_string();
    }

    if let Some(outcome) = outcome {
        return Ok(outcome);
    }

    if options.append_at_eof {
        if last_terminator.is_empty() {
            writeln!(writer)?;
        }
        writeln!(writer, "{}", options.line)?;
        return Ok(InsertOutcome::Appended {
            line_number: lines_written + 1,
        });
    }

    Ok(InsertOutcome::NoInsertionPoint)
}

/// Insert into `source`, writing the result to `target` atomically.
pub fn insert_file(
    source: &Path,
    target: &Path,
    options: &InsertOptions,
    mode: WriteMode,
) -> Result<InsertOutcome> {
    rewrite(source, target, mode, |reader, writer| {
        insert_lines(reader, writer, options)
    })
}
