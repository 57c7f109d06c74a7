//! Localisation corrector.
//!
//! Generated modifier tables carry one entry per line, for example
//!
//! ```text
//!     "land_morale" => Modifier { name: "Morale of Armies", .. },
//! ```
//!
//! The first quoted literal on a line is the modifier key. When the key is in
//! the [`CorrectionTable`], every occurrence of the entry's incorrect text on
//! that line is replaced with the corrected text. All other lines, including
//! the header region, are copied byte for byte.

use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use crate::{
    atomic::{WriteMode, rewrite},
    corrections::CorrectionTable,
    error::Result,
    utils::{copy_lines, split_terminator},
};

/// A line rewritten by the corrector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// 1-based line number in the source file.
    pub line_number: usize,
    pub id: String,
    pub before: String,
    pub after: String,
}

/// A line whose key is in the table but whose content already needed no change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnchangedMatch {
    pub line_number: usize,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionReport {
    pub lines_read: usize,
    /// Lines whose key was found in the table, changed or not.
    pub matched: usize,
    pub changes: Vec<LineChange>,
    pub unchanged: Vec<UnchangedMatch>,
}

/// Text between the first `"` on the line and the next one.
///
/// Returns `None` when the line has no complete quoted literal.
pub fn first_quoted(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once('"')?;
    let (value, _) = rest.split_once('"')?;
    Some(value)
}

/// Apply the correction for this line's key, if any.
///
/// Returns the key and the corrected content when the key is in the table.
pub fn correct_line<'a>(content: &str, table: &'a CorrectionTable) -> Option<(&'a str, String)> {
    let entry = table.get(first_quoted(content)?)?;
    let corrected = if entry.false_value.is_empty() {
        content.to_string()
    } else {
        content.replace(&entry.false_value, &entry.corrected_value)
    };
    Some((&entry.id, corrected))
}

pub fn correct_lines<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    table: &CorrectionTable,
    header_lines: usize,
) -> io::Result<CorrectionReport> {
    let mut report = CorrectionReport {
        lines_read: copy_lines(reader, writer, header_lines)?,
        ..Default::default()
    };

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        report.lines_read += 1;

        let (content, terminator) = split_terminator(&line);
        match correct_line(content, table) {
            Some((id, corrected)) => {
                report.matched += 1;
                writer.write_all(corrected.as_bytes())?;
                writer.write_all(terminator.as_bytes())?;
                if corrected != content {
                    report.changes.push(LineChange {
                        line_number: report.lines_read,
                        id: id.to_string(),
                        before: content.to_string(),
                        after: corrected,
                    });
                } else {
                    report.unchanged.push(UnchangedMatch {
                        line_number: report.lines_read,
                        id: id.to_string(),
                    });
                }
            }
            None => writer.write_all(line.as_bytes())?,
        }
    }

    Ok(report)
}

/// Correct `source` into `target`, replacing `target` atomically.
pub fn correct_file(
    source: &Path,
    target: &Path,
    table: &CorrectionTable,
    header_lines: usize,
    mode: WriteMode,
) -> Result<CorrectionReport> {
    rewrite(source, target, mode, |reader, writer| {
        correct_lines(reader, writer, table, header_lines)
    })
}
