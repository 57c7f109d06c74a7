//! Line helpers shared by the rewriting passes.

use std::io::{self, BufRead, Write};

/// Splits a line read with `read_line` into its content and terminator.
///
/// The terminator is `"\r\n"`, `"\n"`, or empty for a final line without one.
///
/// # Examples
///
/// ```
/// use locfix::utils::split_terminator;
///
/// assert_eq!(split_terminator("abc\n"), ("abc", "\n"));
/// assert_eq!(split_terminator("abc\r\n"), ("abc", "\r\n"));
/// assert_eq!(split_terminator("abc"), ("abc", ""));
/// ```
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Copies up to `count` lines verbatim. Returns how many were copied.
pub fn copy_lines<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    count: usize,
) -> io::Result<usize> {
    let mut line = String::new();
    let mut copied = 0;
    while copied < count {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        writer.write_all(line.as_bytes())?;
        copied += 1;
    }
    Ok(copied)
}
