//! Check engine orchestrator — the main entry point for running checks.
//!
//! [`run_checks`] is the check runner: it applies an ordered registry to one
//! file's content and derives the verdict. [`CheckEngine`] wires the runner to
//! the resolved configuration for the two modes of the binary:
//!
//! - single-file mode ([`CheckEngine::check_file`]), where a read failure is
//!   fatal;
//! - directory-scan mode ([`CheckEngine::scan`]), where a read failure is
//!   recorded as an issue for that file and the scan moves on. Only a failure
//!   to list the directory aborts the scan.
//!
//! Everything runs sequentially on the calling thread.

use std::path::Path;

use regex::Regex;

use crate::checkers::{build_registry, CheckProfile};
use crate::config::CheckConfig;
use crate::discovery::select_files;
use crate::error::CheckError;
use crate::types::{Check, CheckResult, FileIssue, FileReport, Matcher, RunSummary, Subject};

/// Apply every check in `registry` to `content`, in registry order.
///
/// `passed` is the AND of `found` over the critical checks; other severities
/// only add detail. A pattern that does not compile fails that check alone.
#[must_use]
pub fn run_checks(filename: &str, content: &str, registry: &[Check]) -> FileReport {
    let results: Vec<CheckResult> = registry
        .iter()
        .map(|check| evaluate(check, content))
        .collect();

    let passed = results
        .iter()
        .filter(|r| r.check.severity.is_required())
        .all(|r| r.found);

    log::debug!(
        "{filename}: {}/{} checks found, passed={passed}",
        results.iter().filter(|r| r.found).count(),
        results.len()
    );

    FileReport {
        filename: filename.to_owned(),
        size_bytes: content.len(),
        results,
        passed,
    }
}

/// Evaluate one check against the full file content.
fn evaluate(check: &Check, content: &str) -> CheckResult {
    match check.matcher {
        Matcher::Substring(ref text) => CheckResult {
            check: check.clone(),
            found: content.contains(text.as_str()),
            captured: None,
            error: None,
        },
        Matcher::Pattern(ref pattern) => match Regex::new(pattern) {
            Ok(re) => {
                let (found, captured) = match re.captures(content) {
                    Some(caps) => (true, caps.get(1).map(|m| m.as_str().to_owned())),
                    None => (false, None),
                };
                CheckResult {
                    check: check.clone(),
                    found,
                    captured,
                    error: None,
                }
            }
            Err(e) => {
                log::warn!("Check {} has an invalid pattern: {e}", check.id);
                CheckResult {
                    check: check.clone(),
                    found: false,
                    captured: None,
                    error: Some(format!("invalid pattern: {e}")),
                }
            }
        },
    }
}

/// The main check engine.
///
/// Holds the resolved configuration, its profile, and the registry built
/// from them. The registry is fixed for the lifetime of the engine.
pub struct CheckEngine {
    /// The check configuration.
    config: CheckConfig,
    /// The profile selected by the configuration.
    profile: Box<dyn CheckProfile>,
    /// Ordered checks for this run.
    registry: Vec<Check>,
}

impl CheckEngine {
    /// Create a new check engine with the given configuration.
    #[must_use]
    pub fn new(config: CheckConfig) -> Self {
        let profile = config.profile.build();
        let registry = build_registry(profile.as_ref(), &config);
        Self {
            config,
            profile,
            registry,
        }
    }

    /// The check configuration.
    #[must_use]
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// The kind of file the selected profile validates.
    #[must_use]
    pub fn subject(&self) -> Subject {
        self.profile.subject()
    }

    /// The ordered check registry.
    #[must_use]
    pub fn registry(&self) -> &[Check] {
        &self.registry
    }

    /// Run the registry against in-memory content.
    #[must_use]
    pub fn check_content(&self, filename: &str, content: &str) -> FileReport {
        run_checks(filename, content, &self.registry)
    }

    /// Single-file mode: read `base/filename` and check it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingFilename`] for an empty name and
    /// [`CheckError::ReadFile`] if the file cannot be read.
    pub fn check_file(&self, base: &Path, filename: &str) -> Result<FileReport, CheckError> {
        if filename.trim().is_empty() {
            return Err(CheckError::MissingFilename);
        }

        let path = base.join(filename);
        let content = std::fs::read_to_string(&path)
            .map_err(|source| CheckError::ReadFile { path, source })?;

        Ok(self.check_content(filename, &content))
    }

    /// Directory-scan mode: select files in `base` and check each one.
    ///
    /// A file is valid when it could be read and passed; every other selected
    /// file becomes a [`FileIssue`]. Files are processed independently.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ListDir`] if `base` cannot be listed.
    pub fn scan(&self, base: &Path) -> Result<RunSummary, CheckError> {
        let extension = self.config.effective_extension(self.profile.as_ref());
        let prefixes = self.config.effective_excluded_prefixes(self.profile.as_ref());
        let files = select_files(base, &extension, &prefixes, &self.config.exclude)?;

        log::info!(
            "Found {} {} file(s) in {}",
            files.len(),
            self.profile.name(),
            base.display()
        );

        let mut reports = Vec::with_capacity(files.len());
        let mut issues = Vec::new();

        for filename in &files {
            match self.check_file(base, filename) {
                Ok(report) => {
                    if let Some(missing) = report.first_missing_required() {
                        issues.push(FileIssue {
                            filename: filename.clone(),
                            issue: format!("Missing {}", missing.check.name),
                        });
                    }
                    reports.push(report);
                }
                Err(CheckError::ReadFile { source, .. }) => {
                    log::warn!("Skipping {filename}: {source}");
                    issues.push(FileIssue {
                        filename: filename.clone(),
                        issue: format!("Error reading file: {source}"),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(RunSummary {
            total_files: files.len(),
            valid_files: files.len() - issues.len(),
            files_with_issues: issues.len(),
            reports,
            issues,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::Profile;
    use crate::config::RuleSeverityOverride;
    use crate::types::Severity;
    use std::fs;
    use tempfile::tempdir;

    const MINIMAL_CONTRACT: &str =
        "pub fn foo() {} struct Bar {} use stylus_sdk::x; impl Bar {}";

    fn stylus_registry() -> Vec<Check> {
        Profile::Stylus.build().checks()
    }

    #[test]
    fn test_run_checks_registry_order() {
        let registry = stylus_registry();
        let report = run_checks("a.rs", MINIMAL_CONTRACT, &registry);
        let ids: Vec<&str> = report.results.iter().map(|r| r.check.id.as_str()).collect();
        let expected: Vec<&str> = registry.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_run_checks_deterministic() {
        let registry = stylus_registry();
        let first = run_checks("a.rs", MINIMAL_CONTRACT, &registry);
        let second = run_checks("a.rs", MINIMAL_CONTRACT, &registry);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_content_fails_everything() {
        let report = run_checks("empty.rs", "", &stylus_registry());
        assert!(report.results.iter().all(|r| !r.found));
        assert!(!report.passed);
        assert_eq!(report.size_bytes, 0);
    }

    #[test]
    fn test_non_critical_never_flips_verdict() {
        let registry = vec![
            Check::substring("T001", "required", "alpha", Severity::Critical),
            Check::substring("T002", "important", "beta", Severity::Important),
            Check::substring("T003", "optional", "gamma", Severity::Optional),
            Check::substring("T004", "info", "delta", Severity::Info),
        ];
        assert!(run_checks("f", "alpha", &registry).passed);
        assert!(run_checks("f", "alpha beta gamma delta", &registry).passed);
        assert!(!run_checks("f", "beta gamma delta", &registry).passed);
    }

    #[test]
    fn test_registry_without_critical_checks_passes() {
        let registry = vec![Check::substring("T001", "info", "x", Severity::Info)];
        assert!(run_checks("f", "", &registry).passed);
    }

    #[test]
    fn test_invalid_pattern_fails_only_that_check() {
        let registry = vec![
            Check::pattern("T001", "broken", r"impl(\s+", Severity::Optional),
            Check::substring("T002", "present", "impl", Severity::Critical),
        ];
        let report = run_checks("f.rs", "impl Foo {}", &registry);
        assert!(!report.results[0].found);
        assert!(report.results[0].error.as_deref().unwrap().contains("invalid pattern"));
        assert!(report.results[1].found);
        assert!(report.results[1].error.is_none());
        assert!(report.passed);
    }

    #[test]
    fn test_invalid_critical_pattern_fails_file() {
        let registry = vec![Check::pattern("T001", "broken", "(", Severity::Critical)];
        let report = run_checks("f.rs", "(", &registry);
        assert!(!report.passed);
    }

    #[test]
    fn test_pattern_without_group_has_no_capture() {
        let registry = vec![Check::pattern("T001", "fn", r"pub\s+fn", Severity::Critical)];
        let report = run_checks("f.rs", "pub fn a()", &registry);
        assert!(report.results[0].found);
        assert!(report.results[0].captured.is_none());
    }

    #[test]
    fn test_engine_applies_config_overrides() {
        let mut config = CheckConfig::default();
        config
            .rules
            .insert("STY003".to_owned(), RuleSeverityOverride::Off);
        let engine = CheckEngine::new(config);
        assert_eq!(engine.registry().len(), 6);
        // Without the import check, a contract lacking the import passes
        let report = engine.check_content("a.rs", "pub fn a() {} struct A {} impl A {}");
        assert!(report.passed);
    }

    #[test]
    fn test_check_file_reads_relative_to_base() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("microfinance_dao.rs"), MINIMAL_CONTRACT).unwrap();

        let engine = CheckEngine::new(CheckConfig::default());
        let report = engine.check_file(dir.path(), "microfinance_dao.rs").unwrap();
        assert_eq!(report.filename, "microfinance_dao.rs");
        assert_eq!(report.size_bytes, MINIMAL_CONTRACT.len());
        assert!(report.passed);
    }

    #[test]
    fn test_check_file_missing_is_read_error() {
        let dir = tempdir().unwrap();
        let engine = CheckEngine::new(CheckConfig::default());
        let err = engine.check_file(dir.path(), "missing.rs").unwrap_err();
        assert!(matches!(err, CheckError::ReadFile { .. }));
    }

    #[test]
    fn test_check_file_empty_name_is_argument_error() {
        let dir = tempdir().unwrap();
        let engine = CheckEngine::new(CheckConfig::default());
        let err = engine.check_file(dir.path(), "  ").unwrap_err();
        assert!(matches!(err, CheckError::MissingFilename));
    }

    #[test]
    fn test_scan_counts_valid_as_passed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a_good.rs"), MINIMAL_CONTRACT).unwrap();
        fs::write(dir.path().join("b_good.rs"), MINIMAL_CONTRACT).unwrap();
        fs::write(dir.path().join("c_no_impl.rs"), "pub fn a() {} struct A {} use stylus_sdk::x;")
            .unwrap();
        fs::write(dir.path().join("test_helpers.rs"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let engine = CheckEngine::new(CheckConfig::default());
        let summary = engine.scan(dir.path()).unwrap();

        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.valid_files, 2);
        assert_eq!(summary.files_with_issues, 1);
        assert_eq!(summary.reports.len(), 3);
        assert_eq!(
            summary.issues,
            vec![FileIssue {
                filename: "c_no_impl.rs".to_owned(),
                issue: "Missing Implementation blocks".to_owned(),
            }]
        );
        assert!(!summary.all_valid());
    }

    #[test]
    fn test_scan_records_unreadable_file_and_continues() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), MINIMAL_CONTRACT).unwrap();
        // Invalid UTF-8 cannot be read as a string
        fs::write(dir.path().join("b.rs"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("c.rs"), MINIMAL_CONTRACT).unwrap();

        let engine = CheckEngine::new(CheckConfig::default());
        let summary = engine.scan(dir.path()).unwrap();

        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.valid_files, 2);
        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.issues[0].filename, "b.rs");
        assert!(summary.issues[0].issue.starts_with("Error reading file:"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_symlinked_contracts() {
        let dir = tempdir().unwrap();
        let shared = tempdir().unwrap();
        fs::write(shared.path().join("voting_system.rs"), MINIMAL_CONTRACT).unwrap();
        std::os::unix::fs::symlink(
            shared.path().join("voting_system.rs"),
            dir.path().join("voting_system.rs"),
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.rs"), dir.path().join("stale.rs"))
            .unwrap();

        let summary = CheckEngine::new(CheckConfig::default())
            .scan(dir.path())
            .unwrap();

        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.valid_files, 1);
        assert_eq!(summary.reports[0].filename, "voting_system.rs");
        assert_eq!(summary.issues[0].filename, "stale.rs");
        assert!(summary.issues[0].issue.starts_with("Error reading file:"));
    }

    #[test]
    fn test_scan_missing_dir_is_fatal() {
        let engine = CheckEngine::new(CheckConfig::default());
        let err = engine.scan(Path::new("/nonexistent/contracts")).unwrap_err();
        assert!(matches!(err, CheckError::ListDir { .. }));
    }

    #[test]
    fn test_scan_orbit_profile() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("check.js"), "").unwrap();
        fs::write(dir.path().join("validate.js"), "").unwrap();
        fs::write(
            dir.path().join("trade_platform.js"),
            "createRollupChain require('ethers') dotenv.config() chainId: 1 deploy catch (error)",
        )
        .unwrap();

        let config = CheckConfig {
            profile: Profile::Orbit,
            ..CheckConfig::default()
        };
        let engine = CheckEngine::new(config);
        assert_eq!(engine.subject(), Subject::Script);
        let summary = engine.scan(dir.path()).unwrap();
        assert_eq!(summary.total_files, 1);
        assert!(summary.all_valid());
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = tempdir().unwrap();
        let summary = CheckEngine::new(CheckConfig::default())
            .scan(dir.path())
            .unwrap();
        assert_eq!(summary.total_files, 0);
        assert!(summary.all_valid());
    }
}
