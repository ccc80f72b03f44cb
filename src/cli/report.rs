//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style. Separate from core logic so the engine
//! can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, InitSummary};
use crate::{
    core::{ExtractReport, PruneReport, TranslateReport, store::AddedEntry},
    issues::{Issue, Report, ReportLocation},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    print_to(result, verbose, &mut stdout, &mut stderr);
}

/// Print a command result to custom writers.
pub fn print_to<O: Write, E: Write>(result: &CommandResult, verbose: bool, out: &mut O, err: &mut E) {
    match &result.summary {
        CommandSummary::Extract(report) => print_extract_to(report, verbose, out),
        CommandSummary::Translate(report) => print_translate_to(report, out),
        CommandSummary::Prune(report) => print_prune_to(report, verbose, out),
        CommandSummary::Init(summary) => print_init_to(summary, out),
        CommandSummary::Rejected(message) => {
            let _ = writeln!(err, "Error: {}", message);
        }
    }

    if verbose {
        report_to(&result.issues, out);
    } else {
        print_warning_count_to(result.issues.len(), err);
    }
}

/// Print issues in cargo-style format.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let _ = writeln!(writer);
    for issue in issues {
        print_issue(issue, writer);
    }

    let _ = writeln!(
        writer,
        "{} {}",
        issues.len(),
        if issues.len() == 1 { "warning" } else { "warnings" }.yellow()
    );
}

/// Print a one-line warning count with a hint to use `-v`.
pub fn print_warning_count_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} warning(s) (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}  {}",
        "warning:".bold().yellow(),
        issue.message(),
        issue.kind().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Line { path, line } => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), path, line);
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::None => {}
    }

    let _ = writeln!(writer);
}

fn print_extract_to<W: Write>(report: &ExtractReport, verbose: bool, writer: &mut W) {
    if verbose && !report.added.is_empty() {
        print_added_to(&report.added, writer);
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} {}, found {} {}",
            report.files_scanned,
            plural(report.files_scanned, "file", "files"),
            report.extracted,
            plural(report.extracted, "string", "strings"),
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "  {} {} new {} to {} ({} already present, {} total)",
        "Added".green().bold(),
        report.added.len(),
        plural(report.added.len(), "entry", "entries"),
        report.output.display(),
        report.already_present,
        report.existing_entries + report.added.len()
    );
}

/// Print new entries with values aligned by display width.
fn print_added_to<W: Write>(added: &[AddedEntry], writer: &mut W) {
    let width = added
        .iter()
        .map(|entry| UnicodeWidthStr::width(entry.key.as_str()))
        .max()
        .unwrap_or(0);

    for entry in added {
        let padding = width - UnicodeWidthStr::width(entry.key.as_str());
        let _ = writeln!(
            writer,
            "  {} {}{:padding$} = {}",
            "+".green(),
            entry.key.cyan(),
            "",
            entry.value,
            padding = padding
        );
    }
    let _ = writeln!(writer);
}

fn print_translate_to<W: Write>(report: &TranslateReport, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} {} to {}",
            report.entries,
            plural(report.entries, "entry", "entries"),
            report.target.display()
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "  - translated: {}, kept: {}, copied from source: {}, dropped: {}",
        report.translated, report.kept, report.fallbacks, report.dropped
    );
}

fn print_prune_to<W: Write>(report: &PruneReport, verbose: bool, writer: &mut W) {
    if report.keys.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("No placeholder keys in {}", report.main.display()).green()
        );
        return;
    }

    for sibling in &report.siblings {
        let _ = writeln!(
            writer,
            "  {} {}: {} key(s)",
            "-->".blue(),
            sibling.path.display(),
            sibling.removed.len()
        );
        if verbose {
            for key in &sibling.removed {
                let _ = writeln!(writer, "      - {}", key);
            }
        }
    }

    let total = report.removed_count();
    if report.applied {
        let _ = writeln!(
            writer,
            "{} {} key(s) from {} file(s).",
            "Removed".green().bold(),
            total,
            report.siblings.len()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} key(s) from {} file(s).",
            "Would remove".yellow().bold(),
            total,
            report.siblings.len()
        );
        if total > 0 {
            let _ = writeln!(writer, "Run with {} to remove these keys.", "--apply".cyan());
        }
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path).green()
    );
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

// ============================================================
// Tests
// ============================================================
