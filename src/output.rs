//! CLI output formatting.
//!
//! One line per indexed directory, leading with the directory and the page
//! that was written, followed by what went into it:
//!
//! ```text
//! Indexed /srv/files/pub → index.html (12 entries, preview)
//! Indexed /srv/files/empty → index.html (0 entries)
//! ```
//!
//! `--keep-going` runs end with a summary:
//!
//! ```text
//! Indexed 2 of 3 directories
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns plain strings for testability, and a
//! `print_*` wrapper writes them to stdout. Format functions are pure: no I/O,
//! no side effects. Errors are not printed here; `main` owns stderr.

use crate::index::IndexReport;

/// Pluralize "entry" for a count.
fn entries_label(n: usize) -> String {
    match n {
        1 => "1 entry".to_string(),
        n => format!("{n} entries"),
    }
}

/// Format the progress line for one indexed directory.
pub fn format_index_report(report: &IndexReport) -> String {
    let page = report
        .output
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.output.display().to_string());
    let preview = if report.has_preview { ", preview" } else { "" };
    format!(
        "Indexed {} → {} ({}{})",
        report.dir.display(),
        page,
        entries_label(report.rows),
        preview
    )
}

/// Format the end-of-run summary.
pub fn format_summary(succeeded: usize, attempted: usize) -> String {
    let noun = if attempted == 1 {
        "directory"
    } else {
        "directories"
    };
    format!("Indexed {succeeded} of {attempted} {noun}")
}

/// Print the progress line for one indexed directory.
pub fn print_index_report(report: &IndexReport) {
    println!("{}", format_index_report(report));
}

/// Print the end-of-run summary.
pub fn print_summary(succeeded: usize, attempted: usize) {
    println!("{}", format_summary(succeeded, attempted));
}
