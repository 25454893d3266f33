//! Core type definitions for the Pulse Check Engine.
//!
//! - [`Severity`] tags every check; only [`Severity::Critical`] is required
//! - [`Subject`] is the kind of file a profile validates
//! - [`Matcher`] is the predicate a check applies to a file's full text
//! - [`Check`] is one registry entry
//! - [`CheckResult`] is the outcome of one check against one file
//! - [`FileReport`] is the per-file record and verdict
//! - [`RunSummary`] is the aggregate of one directory scan

use serde::{Deserialize, Serialize};

/// Severity tag attached to a check.
///
/// Severity is metadata only. It never changes how a matcher evaluates; it
/// only decides whether a missing match fails the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be found for the file to pass.
    Critical,
    /// Expected in a well-formed file, but advisory.
    Important,
    /// Nice to have.
    Optional,
    /// Informational only.
    Info,
}

impl Severity {
    /// Whether a missing match for this severity fails the file.
    #[must_use]
    pub fn is_required(self) -> bool {
        self == Self::Critical
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::Important => write!(f, "Important"),
            Self::Optional => write!(f, "Optional"),
            Self::Info => write!(f, "Info"),
        }
    }
}

/// The kind of file a profile validates. Drives report wording only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// Stylus smart contracts.
    Contract,
    /// Orbit chain deployment scripts.
    Script,
}

/// How a check tests a file's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Matcher {
    /// Literal substring containment.
    Substring(String),
    /// Regular expression source, compiled when evaluated.
    Pattern(String),
}

impl Matcher {
    /// The raw substring or pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Substring(s) | Self::Pattern(s) => s,
        }
    }
}

/// A named, severity-tagged content check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Stable rule identifier (e.g., `"STY001"`, `"ORB004"`).
    pub id: String,

    /// Human-readable label printed in reports.
    pub name: String,

    /// Predicate applied to the full file content.
    pub matcher: Matcher,

    /// Severity tag; only `Critical` affects the verdict.
    pub severity: Severity,
}

impl Check {
    /// Build a substring check.
    #[must_use]
    pub fn substring(id: &str, name: &str, text: &str, severity: Severity) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            matcher: Matcher::Substring(text.to_owned()),
            severity,
        }
    }

    /// Build a regex pattern check.
    #[must_use]
    pub fn pattern(id: &str, name: &str, pattern: &str, severity: Severity) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            matcher: Matcher::Pattern(pattern.to_owned()),
            severity,
        }
    }
}

/// Outcome of one check against one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The check that was evaluated.
    pub check: Check,

    /// Whether the matcher was satisfied.
    pub found: bool,

    /// First capture group of a pattern match, when the pattern has one.
    pub captured: Option<String>,

    /// Matcher failure (e.g., a pattern that does not compile).
    pub error: Option<String>,
}

/// Per-file record of check outcomes and the derived verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// File name relative to the base directory.
    pub filename: String,

    /// Content length in bytes.
    pub size_bytes: usize,

    /// Check outcomes in registry order.
    pub results: Vec<CheckResult>,

    /// True iff every `Critical` check was found.
    pub passed: bool,
}

impl FileReport {
    /// The first required check that was not found, if any.
    #[must_use]
    pub fn first_missing_required(&self) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|r| r.check.severity.is_required() && !r.found)
    }
}

/// Why a file was counted as having issues during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIssue {
    /// File name relative to the base directory.
    pub filename: String,

    /// Read error text, or the first missing critical check.
    pub issue: String,
}

/// Aggregate tally of one directory scan.
///
/// A file is *valid* when it was readable and passed every critical check,
/// so `valid_files + files_with_issues == total_files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of files selected for checking.
    pub total_files: usize,

    /// Files that were read and passed.
    pub valid_files: usize,

    /// Files that could not be read or failed a critical check.
    pub files_with_issues: usize,

    /// Reports for every file that could be read, in selection order.
    pub reports: Vec<FileReport>,

    /// One entry per file with issues, in selection order.
    pub issues: Vec<FileIssue>,
}

impl RunSummary {
    /// Whether every selected file is valid.
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.files_with_issues == 0
    }
}
