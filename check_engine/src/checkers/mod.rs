//! Check profiles and registry construction.
//!
//! Every profile implements the [`CheckProfile`] trait, providing its ordered
//! list of checks and the default file-selection rules for the directory it
//! validates. Profiles are stateless.
//!
//! [`build_registry`] turns a profile plus the resolved configuration into the
//! fixed, ordered check list used for one run.

pub mod orbit;
pub mod stylus;

use std::str::FromStr;

use crate::config::{CheckConfig, RuleSeverityOverride};
use crate::types::{Check, Subject};

/// Every profile implements this trait.
pub trait CheckProfile: Send + Sync {
    /// Unique profile name (used in config and on the command line).
    fn name(&self) -> &'static str;

    /// What the checked files are, for report wording.
    fn subject(&self) -> Subject;

    /// File extension selected in directory-scan mode, including the dot.
    fn default_extension(&self) -> &'static str;

    /// File-name prefixes excluded in directory-scan mode.
    fn default_excluded_prefixes(&self) -> &'static [&'static str];

    /// The built-in checks, in report order.
    fn checks(&self) -> Vec<Check>;
}

/// Selectable built-in profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Stylus smart contracts (`.rs`).
    #[default]
    Stylus,
    /// Orbit chain deployment scripts (`.js`).
    Orbit,
}

impl Profile {
    /// Resolve the profile implementation.
    #[must_use]
    pub fn build(self) -> Box<dyn CheckProfile> {
        match self {
            Self::Stylus => Box::new(stylus::StylusProfile),
            Self::Orbit => Box::new(orbit::OrbitProfile),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stylus => write!(f, "stylus"),
            Self::Orbit => write!(f, "orbit"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stylus" => Ok(Self::Stylus),
            "orbit" => Ok(Self::Orbit),
            other => Err(other.to_owned()),
        }
    }
}

/// Build the ordered check registry for a run.
///
/// Starts from the profile's built-in checks, drops checks whose id is set to
/// `off`, applies severity overrides, then appends the configured custom
/// checks. Overrides apply to custom checks too.
#[must_use]
pub fn build_registry(profile: &dyn CheckProfile, config: &CheckConfig) -> Vec<Check> {
    let mut registry = profile.checks();
    registry.extend(config.custom_checks.iter().cloned());

    registry
        .into_iter()
        .filter_map(|mut check| match config.rules.get(&check.id) {
            Some(RuleSeverityOverride::Off) => {
                log::debug!("Check {} ({}) disabled by config", check.id, check.name);
                None
            }
            Some(RuleSeverityOverride::Severity(severity)) => {
                check.severity = *severity;
                Some(check)
            }
            None => Some(check),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn test_profile_from_str() {
        assert_eq!("stylus".parse::<Profile>(), Ok(Profile::Stylus));
        assert_eq!("ORBIT".parse::<Profile>(), Ok(Profile::Orbit));
        assert_eq!("solana".parse::<Profile>(), Err("solana".to_owned()));
    }

    #[test]
    fn test_profile_display_roundtrips_name() {
        for profile in [Profile::Stylus, Profile::Orbit] {
            assert_eq!(profile.to_string(), profile.build().name());
        }
    }

    #[test]
    fn test_registry_defaults_to_profile_checks() {
        let config = CheckConfig::default();
        let profile = Profile::Stylus.build();
        assert_eq!(build_registry(profile.as_ref(), &config), profile.checks());
    }

    #[test]
    fn test_registry_off_removes_check() {
        let mut config = CheckConfig::default();
        config
            .rules
            .insert("STY005".to_owned(), RuleSeverityOverride::Off);
        let registry = build_registry(Profile::Stylus.build().as_ref(), &config);
        assert_eq!(registry.len(), 6);
        assert!(!registry.iter().any(|c| c.id == "STY005"));
    }

    #[test]
    fn test_registry_severity_override() {
        let mut config = CheckConfig::default();
        config.rules.insert(
            "STY006".to_owned(),
            RuleSeverityOverride::Severity(Severity::Critical),
        );
        let registry = build_registry(Profile::Stylus.build().as_ref(), &config);
        let no_std = registry.iter().find(|c| c.id == "STY006").unwrap();
        assert_eq!(no_std.severity, Severity::Critical);
    }

    #[test]
    fn test_registry_appends_custom_checks_in_order() {
        let mut config = CheckConfig::default();
        config.custom_checks.push(Check::substring(
            "CUS001",
            "Event emission",
            "emit",
            Severity::Info,
        ));
        let registry = build_registry(Profile::Stylus.build().as_ref(), &config);
        assert_eq!(registry.last().unwrap().id, "CUS001");
        assert_eq!(registry.len(), 8);
    }
}
