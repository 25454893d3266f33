//! Orbit chain script profile — rules ORB001 through ORB007.
//!
//! Orbit demo scripts are plain JavaScript that call `createRollupChain`
//! through `ethers` with `dotenv`-loaded settings. All presence checks are
//! required. ORB007 is informational and captures the configured chain ID.

use crate::checkers::CheckProfile;
use crate::types::{Check, Severity, Subject};

/// Orbit deployment-script profile.
pub struct OrbitProfile;

impl CheckProfile for OrbitProfile {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn default_extension(&self) -> &'static str {
        ".js"
    }

    fn subject(&self) -> Subject {
        Subject::Script
    }

    fn default_excluded_prefixes(&self) -> &'static [&'static str] {
        &["check", "test_", "validate"]
    }

    fn checks(&self) -> Vec<Check> {
        vec![
            Check::substring(
                "ORB001",
                "createRollupChain import",
                "createRollupChain",
                Severity::Critical,
            ),
            Check::substring("ORB002", "ethers import", "require('ethers')", Severity::Critical),
            Check::substring("ORB003", "dotenv config", "dotenv.config()", Severity::Critical),
            Check::substring("ORB004", "Chain ID configuration", "chainId:", Severity::Critical),
            Check::substring("ORB005", "Contract deployment", "deploy", Severity::Critical),
            Check::substring("ORB006", "Error handling", "catch (error)", Severity::Critical),
            Check::pattern("ORB007", "Chain ID value", r"chainId:\s*(\d+)", Severity::Info),
        ]
    }
}
