//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`.

use std::io::Write;

use serde::Serialize;

use crate::report::{BlockOutcome, RunSummary, ValidationReport};

const BANNER_WIDTH: usize = 42;

/// Printed instead of a report when no documentation file exists.
pub const NO_SOURCES_MESSAGE: &str = "No source files found.";

#[derive(Serialize)]
struct JsonReport<'a> {
    scanned_files: usize,
    ok: bool,
    summary: RunSummary,
    blocks: &'a [BlockOutcome],
}

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport {
        scanned_files: report.scanned_files,
        ok: report.ok(),
        summary: report.summary(),
        blocks: &report.blocks,
    })?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// One report line for a block.
#[must_use]
pub fn format_outcome(outcome: &BlockOutcome) -> String {
    match &outcome.error {
        None => format!(
            "\u{2705} {} (block {})",
            outcome.file.display(),
            outcome.block
        ),
        Some(reason) => format!(
            "\u{274c} {} (block {}): {reason}",
            outcome.file.display(),
            outcome.block
        ),
    }
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    if report.scanned_files == 0 {
        writeln!(writer, "{NO_SOURCES_MESSAGE}")?;
        return Ok(());
    }

    for outcome in &report.blocks {
        writeln!(writer, "{}", format_outcome(outcome))?;
    }

    let summary = report.summary();
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(writer, "SUMMARY")?;
    writeln!(writer, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(
        writer,
        "Total: {} | Passed: {} | Failed: {}",
        summary.total, summary.passed, summary.failed
    )?;
    if summary.failed > 0 {
        writeln!(writer, "\u{274c} Some blocks invalid.")?;
    } else {
        writeln!(writer, "\u{1f389} All valid.")?;
    }

    Ok(())
}
