//! Configuration loading and resolution for the Pulse Check Engine.
//!
//! Resolution order (first file found wins):
//! 1. An explicit config file passed on the command line
//! 2. `pulse-check.toml` in the base directory (`[check]` section)
//! 3. `pulse-check.yaml` / `pulse-check.yml` in the base directory (`check:` key)
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top of the resolved config by the binary.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::checkers::{CheckProfile, Profile};
use crate::types::{Check, Matcher, Severity};

/// Config file names probed in the base directory, in priority order.
const TOML_CONFIG_FILE: &str = "pulse-check.toml";
const YAML_CONFIG_FILES: &[&str] = &["pulse-check.yaml", "pulse-check.yml"];

// ---------------------------------------------------------------------------
// Rule override
// ---------------------------------------------------------------------------

/// Per-check severity override, or `Off` to drop the check from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSeverityOverride {
    /// Replace the check's severity.
    Severity(Severity),
    /// Remove the check entirely.
    Off,
}

// ---------------------------------------------------------------------------
// Main config
// ---------------------------------------------------------------------------

/// Resolved checker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckConfig {
    /// Built-in profile providing the base registry and file selection.
    pub profile: Profile,

    /// Overrides the profile's file extension in directory-scan mode.
    pub extension: Option<String>,

    /// Overrides the profile's excluded file-name prefixes.
    pub exclude_prefixes: Option<Vec<String>>,

    /// Extra glob patterns excluding file names from a scan.
    pub exclude: Vec<String>,

    /// Whether any file with issues should produce a failing exit status.
    pub fail_on_issues: bool,

    /// Per-check overrides keyed by check id.
    pub rules: HashMap<String, RuleSeverityOverride>,

    /// Extra checks appended after the profile's built-in checks.
    pub custom_checks: Vec<Check>,
}

impl CheckConfig {
    /// Load configuration from the base directory using the resolution order.
    ///
    /// # Errors
    ///
    /// Returns an error if a found config file cannot be read or parsed, or
    /// if it names an unknown profile or an invalid custom check.
    pub fn load_from_dir(base: &Path) -> Result<Self, ConfigError> {
        let toml_path = base.join(TOML_CONFIG_FILE);
        if toml_path.is_file() {
            log::debug!("Loading config from {}", toml_path.display());
            return Self::load_from_file(&toml_path);
        }

        for name in YAML_CONFIG_FILES {
            let yaml_path = base.join(name);
            if yaml_path.is_file() {
                log::debug!("Loading config from {}", yaml_path.display());
                return Self::load_from_file(&yaml_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from an explicit file.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else
    /// as TOML. A file without a `check` section yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its
    /// section is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(display.clone(), e.to_string()))?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let parsed: ConfigFile = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(display.clone(), e.to_string()))?
        } else {
            toml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(display.clone(), e.to_string()))?
        };

        let mut config = Self::default();
        if let Some(ref section) = parsed.check {
            apply_section(&mut config, section)?;
        }
        Ok(config)
    }

    /// File extension used when scanning, including the leading dot.
    #[must_use]
    pub fn effective_extension(&self, profile: &dyn CheckProfile) -> String {
        match self.extension {
            Some(ref ext) if ext.starts_with('.') => ext.clone(),
            Some(ref ext) => format!(".{ext}"),
            None => profile.default_extension().to_owned(),
        }
    }

    /// File-name prefixes excluded when scanning.
    #[must_use]
    pub fn effective_excluded_prefixes(&self, profile: &dyn CheckProfile) -> Vec<String> {
        match self.exclude_prefixes {
            Some(ref prefixes) => prefixes.clone(),
            None => profile
                .default_excluded_prefixes()
                .iter()
                .map(|p| (*p).to_owned())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// File deserialization helpers
// ---------------------------------------------------------------------------

/// Raw structure shared by the TOML and YAML config files.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    check: Option<CheckSection>,
}

/// The `[check]` section.
#[derive(Debug, Deserialize)]
struct CheckSection {
    profile: Option<String>,
    extension: Option<String>,
    exclude_prefixes: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    fail_on_issues: Option<bool>,
    rules: Option<HashMap<String, String>>,
    custom: Option<Vec<CustomCheckSection>>,
}

/// One `[[check.custom]]` entry.
#[derive(Debug, Deserialize)]
struct CustomCheckSection {
    id: String,
    name: Option<String>,
    substring: Option<String>,
    pattern: Option<String>,
    severity: Option<String>,
}

/// Parse a severity name.
fn parse_severity(s: &str) -> Option<Severity> {
    match s.trim().to_lowercase().as_str() {
        "critical" | "required" => Some(Severity::Critical),
        "important" => Some(Severity::Important),
        "optional" => Some(Severity::Optional),
        "info" => Some(Severity::Info),
        _ => None,
    }
}

/// Parse a rule override value.
fn parse_rule_override(s: &str) -> Option<RuleSeverityOverride> {
    match s.trim().to_lowercase().as_str() {
        "off" | "disabled" | "false" => Some(RuleSeverityOverride::Off),
        other => parse_severity(other).map(RuleSeverityOverride::Severity),
    }
}

/// Turn a custom check entry into a [`Check`].
fn build_custom_check(entry: &CustomCheckSection) -> Result<Check, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidCustomCheck(entry.id.clone(), reason.to_owned());

    if entry.id.trim().is_empty() {
        return Err(invalid("id must not be empty"));
    }

    let matcher = match (&entry.substring, &entry.pattern) {
        (Some(text), None) => Matcher::Substring(text.clone()),
        (None, Some(pattern)) => Matcher::Pattern(pattern.clone()),
        (Some(_), Some(_)) => return Err(invalid("set only one of 'substring' or 'pattern'")),
        (None, None) => return Err(invalid("one of 'substring' or 'pattern' is required")),
    };

    let severity = match entry.severity {
        Some(ref s) => parse_severity(s).ok_or_else(|| invalid(&format!("unknown severity '{s}'")))?,
        None => Severity::Info,
    };

    Ok(Check {
        id: entry.id.clone(),
        name: entry.name.clone().unwrap_or_else(|| entry.id.clone()),
        matcher,
        severity,
    })
}

/// Apply a [`CheckSection`] onto a [`CheckConfig`], overriding any set values.
fn apply_section(config: &mut CheckConfig, section: &CheckSection) -> Result<(), ConfigError> {
    if let Some(ref v) = section.profile {
        config.profile = v
            .parse()
            .map_err(ConfigError::UnknownProfile)?;
    }
    if let Some(ref v) = section.extension {
        config.extension = Some(v.clone());
    }
    if let Some(ref v) = section.exclude_prefixes {
        config.exclude_prefixes = Some(v.clone());
    }
    if let Some(ref v) = section.exclude {
        config.exclude = v.clone();
    }
    if let Some(v) = section.fail_on_issues {
        config.fail_on_issues = v;
    }
    if let Some(ref rules) = section.rules {
        for (check_id, value) in rules {
            match parse_rule_override(value) {
                Some(rule) => {
                    config.rules.insert(check_id.clone(), rule);
                }
                None => log::warn!("Ignoring unknown severity '{value}' for check {check_id}"),
            }
        }
    }
    if let Some(ref custom) = section.custom {
        for entry in custom {
            config.custom_checks.push(build_custom_check(entry)?);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file '{0}': {1}")]
    ReadError(String, String),

    /// Failed to parse a configuration file.
    #[error("Failed to parse config file '{0}': {1}")]
    ParseError(String, String),

    /// The configured profile name is not a built-in profile.
    #[error("Unknown profile '{0}' (expected 'stylus' or 'orbit')")]
    UnknownProfile(String),

    /// A custom check entry is malformed.
    #[error("Invalid custom check '{0}': {1}")]
    InvalidCustomCheck(String, String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
