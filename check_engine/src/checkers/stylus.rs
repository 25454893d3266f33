//! Stylus contract profile — rules STY001 through STY007.
//!
//! Checks that a Rust file looks like a Stylus contract: public entry points,
//! a storage struct, the `stylus_sdk` import, and impl blocks are required.
//! The `#[external]`, `#[payable]` and `#![no_std]` attributes are advisory.
//!
//! These are text-presence heuristics. `struct\s+\w+` confirms the keyword and
//! an identifier, not the struct's fields.

use crate::checkers::CheckProfile;
use crate::types::{Check, Severity, Subject};

/// Stylus contract profile.
pub struct StylusProfile;

impl CheckProfile for StylusProfile {
    fn name(&self) -> &'static str {
        "stylus"
    }

    fn default_extension(&self) -> &'static str {
        ".rs"
    }

    fn subject(&self) -> Subject {
        Subject::Contract
    }

    fn default_excluded_prefixes(&self) -> &'static [&'static str] {
        &["test_"]
    }

    fn checks(&self) -> Vec<Check> {
        vec![
            Check::pattern("STY001", "Public functions", r"pub\s+fn", Severity::Critical),
            Check::pattern("STY002", "Struct definitions", r"struct\s+\w+", Severity::Critical),
            Check::pattern("STY003", "Stylus imports", r"use\s+stylus_sdk", Severity::Critical),
            Check::pattern("STY004", "External attribute", r"#\[external\]", Severity::Important),
            Check::pattern("STY005", "Payable attribute", r"#\[payable", Severity::Optional),
            Check::pattern("STY006", "No std attribute", r"#!\[no_std\]", Severity::Important),
            Check::pattern("STY007", "Implementation blocks", r"impl\s+\w+", Severity::Critical),
        ]
    }
}
