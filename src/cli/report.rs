//! Report formatting and printing utilities.
//!
//! Commands return plain data; everything the user sees is printed here.
//! Normal output goes to stdout, warnings to stderr.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, CorrectSummary, ExtractSummary, InitSummary, InsertSummary,
    ResolveRunSummary,
};
use crate::{extract::ExtractOutcome, insert::InsertOutcome, resolve::ResolvedEntry};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the outcome of a command to stdout and stderr.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print the outcome of a command to custom writers.
pub fn print_to<W: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Correct(summary) => print_correct(summary, verbose, out),
        CommandSummary::Insert(summary) => print_insert(summary, out, err),
        CommandSummary::Extract(summary) => print_extract(summary, verbose, out),
        CommandSummary::Resolve(summary) => print_resolve(summary, out),
        CommandSummary::Init(summary) => print_init(summary, out),
    }
}

/// Print one insertion made by the resolve loop as it happens.
pub fn print_resolved(entry: &ResolvedEntry, verbose: bool) {
    print_resolved_to(entry, verbose, &mut io::stdout().lock());
}

pub fn print_resolved_to<W: Write>(entry: &ResolvedEntry, verbose: bool, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} at line {}",
        "Inserted".green().bold(),
        entry.extraction.identifier.cyan(),
        entry.line_number
    );
    if verbose {
        let _ = writeln!(writer, "  {} {}", "+".green(), entry.extraction.line());
    }
}

fn print_correct<W: Write>(summary: &CorrectSummary, verbose: bool, writer: &mut W) {
    let report = &summary.report;

    if verbose || !summary.is_apply {
        for change in &report.changes {
            let _ = writeln!(
                writer,
                "{}:{} {}",
                summary.source.display(),
                change.line_number,
                change.id.dimmed().cyan()
            );
            let _ = writeln!(writer, "  {} {}", "-".red(), change.before);
            let _ = writeln!(writer, "  {} {}", "+".green(), change.after);
        }
    }
    if verbose {
        for matched in &report.unchanged {
            let _ = writeln!(
                writer,
                "{}:{} {} {}",
                summary.source.display(),
                matched.line_number,
                matched.id.dimmed().cyan(),
                "(already correct)".dimmed()
            );
        }
    }

    let changed = report.changes.len();
    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Corrected {} line(s) in {} ({} of {} entries matched)",
                changed,
                summary.target.display(),
                report.matched,
                summary.entries
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} line(s) in {} ({} of {} entries matched).",
            "Would correct".yellow().bold(),
            changed,
            summary.source.display(),
            report.matched,
            summary.entries
        );
        if changed > 0 {
            let _ = writeln!(writer, "Run without {} to write them.", "--dry-run".cyan());
        }
    }
}

fn print_insert<W: Write, E: Write>(summary: &InsertSummary, out: &mut W, err: &mut E) {
    let (done, pending, line_number) = match summary.outcome {
        InsertOutcome::Inserted { line_number } => ("Inserted", "Would insert", line_number),
        InsertOutcome::Appended { line_number } => ("Appended", "Would append", line_number),
        InsertOutcome::NoInsertionPoint => {
            let _ = writeln!(
                err,
                "{} no line in {} sorts after {:?}; the file was left unchanged (use {} to append it)",
                "warning:".bold().yellow(),
                summary.source.display(),
                summary.line,
                "--append-at-eof".cyan()
            );
            return;
        }
    };

    if summary.is_apply {
        let _ = writeln!(
            out,
            "{} {} line {} of {}",
            SUCCESS_MARK.green(),
            done.green().bold(),
            line_number,
            summary.target.display()
        );
    } else {
        let _ = writeln!(
            out,
            "{} line {} of {}:",
            pending.yellow().bold(),
            line_number,
            summary.source.display()
        );
        let _ = writeln!(out, "  {} {}", "+".green(), summary.line);
    }
}

fn print_extract<W: Write>(summary: &ExtractSummary, verbose: bool, writer: &mut W) {
    match &summary.outcome {
        ExtractOutcome::Passed => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                "Tests passed - no unknown modifier".green()
            );
        }
        ExtractOutcome::Failed {
            failure,
            extraction,
        } => {
            let _ = writeln!(
                writer,
                "{} {} {}",
                FAILURE_MARK.red(),
                "Unknown modifier:".red().bold(),
                extraction.identifier.cyan()
            );
            let _ = writeln!(writer, "  {} {}", "+".green(), extraction.line());
            if verbose {
                let _ = writeln!(writer, "  {} {}", "command:".dimmed(), summary.command);
                if let Some(code) = failure.code {
                    let _ = writeln!(writer, "  {} {}", "exit code:".dimmed(), code);
                }
            }
        }
    }
}

fn print_resolve<W: Write>(summary: &ResolveRunSummary, writer: &mut W) {
    let inserted = summary.summary.inserted.len();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Tests pass after {} round(s); inserted {} line(s) into {}",
            summary.summary.rounds,
            inserted,
            summary.source.display()
        )
        .green()
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}
