//! Text and JSON output generation for the Pulse Check Engine.
//!
//! Produces two output formats:
//!
//! 1. **Text** — the human-readable terminal report. Per file: size, one
//!    `[PASS]`/`[FAIL]` line per check in registry order, then a verdict
//!    line worded for contracts or scripts. Scans end with an aggregate
//!    summary, the list of files with issues, and an overall verdict.
//!    Output is deterministic for a given input.
//!
//! 2. **JSON** — `serde_json` serialization of [`FileReport`] or
//!    [`RunSummary`]. Used by `pulse-check --json`. Not a frozen format.
//!
//! Rendering returns strings; only the binary writes to stdout.

use std::fmt::Write;

use serde::Serialize;

use crate::types::{CheckResult, FileReport, RunSummary, Subject};

/// Verdict line for a contract that found every critical check.
pub const CONTRACT_PASS_VERDICT: &str = "✅ Contract passes all critical checks";

/// Verdict line for a contract missing at least one critical check.
pub const CONTRACT_FAIL_VERDICT: &str = "❌ Contract is missing critical elements";

/// Verdict line for a deployment script that found every critical check.
pub const SCRIPT_PASS_VERDICT: &str = "Script status: ✅ PASSED";

/// Verdict line for a deployment script missing a critical check.
pub const SCRIPT_FAIL_VERDICT: &str = "Script status: ⚠️ ISSUES FOUND";

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Format a byte count the way the report shows file sizes (`"1.25 KB"`).
#[must_use]
pub fn format_size(bytes: usize) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Render a single check line.
#[must_use]
pub fn render_check_line(result: &CheckResult) -> String {
    let mut line = format!(
        "[{}] {} ({})",
        if result.found { "PASS" } else { "FAIL" },
        result.check.name,
        result.check.severity,
    );
    if let Some(ref value) = result.captured {
        let _ = write!(line, ": {value}");
    }
    if let Some(ref error) = result.error {
        let _ = write!(line, " - error: {error}");
    }
    line
}

/// The verdict line for a report.
#[must_use]
pub fn verdict_line(report: &FileReport, subject: Subject) -> &'static str {
    match (subject, report.passed) {
        (Subject::Contract, true) => CONTRACT_PASS_VERDICT,
        (Subject::Contract, false) => CONTRACT_FAIL_VERDICT,
        (Subject::Script, true) => SCRIPT_PASS_VERDICT,
        (Subject::Script, false) => SCRIPT_FAIL_VERDICT,
    }
}

/// The closing line of a scan, after the counts.
#[must_use]
pub fn overall_verdict(summary: &RunSummary, subject: Subject) -> &'static str {
    match (subject, summary.all_valid()) {
        (Subject::Contract, true) => "✅ All contracts passed validation checks",
        (Subject::Contract, false) => "⚠️ Some contracts have issues to address",
        (Subject::Script, true) => "✅ All scripts passed validation checks",
        (Subject::Script, false) => "⚠️ Some scripts have issues to address",
    }
}

/// Render the body shared by both modes: size, check lines, and verdict.
fn render_body(
    out: &mut String,
    report: &FileReport,
    subject: Subject,
    verdict_heading: Option<&str>,
) {
    let _ = writeln!(out, "File size: {}", format_size(report.size_bytes));
    out.push('\n');
    out.push_str("Basic checks:\n");
    for result in &report.results {
        out.push_str(&render_check_line(result));
        out.push('\n');
    }
    out.push('\n');
    if let Some(heading) = verdict_heading {
        let _ = writeln!(out, "{heading}");
    }
    let _ = writeln!(out, "{}", verdict_line(report, subject));
}

/// Render the single-file mode report.
#[must_use]
pub fn render_single(report: &FileReport, subject: Subject) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Successfully read file: {}", report.filename);
    render_body(&mut out, report, subject, Some("Summary:"));
    out
}

/// Render one file's block inside a scan report.
#[must_use]
pub fn render_file_report(report: &FileReport, subject: Subject) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "==== Checking {} ====", report.filename);
    render_body(&mut out, report, subject, None);
    out
}

/// Render the aggregate summary of a scan.
#[must_use]
pub fn render_summary(summary: &RunSummary, subject: Subject) -> String {
    let mut out = String::new();
    out.push_str("==== VALIDATION SUMMARY ====\n");
    let _ = writeln!(out, "Found {} file(s) to check", summary.total_files);
    let _ = writeln!(out, "{} valid", summary.valid_files);
    let _ = writeln!(out, "{} with issues", summary.files_with_issues);

    if !summary.issues.is_empty() {
        out.push_str("\nIssues found:\n");
        for issue in &summary.issues {
            let _ = writeln!(out, "- {}: {}", issue.filename, issue.issue);
        }
    }
    out.push('\n');
    let _ = writeln!(out, "{}", overall_verdict(summary, subject));
    out
}

/// Render the full directory-scan report: every file block, then the summary.
#[must_use]
pub fn render_scan(summary: &RunSummary, subject: Subject) -> String {
    let mut out = String::new();
    for report in &summary.reports {
        out.push_str(&render_file_report(report, subject));
        out.push('\n');
    }
    out.push_str(&render_summary(summary, subject));
    out
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

/// Serialize a report or summary to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error message if serialization fails (should not happen for valid data).
pub fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
