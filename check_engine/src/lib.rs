//! Pulse Check Engine — static validation for Arbitrum Pulse code snippets.
//!
//! A heuristic linter for the Stylus contracts and Orbit chain deployment
//! scripts in the demo repository. It lists candidate files in a directory,
//! runs an ordered registry of named, severity-tagged text checks over each
//! one, and reports which files carry every critical element.
//!
//! Checks test text presence only. They do not parse or verify the code.
//!
//! ```no_run
//! use std::path::Path;
//! use pulse_check_engine::{config::CheckConfig, engine::CheckEngine, reporter};
//!
//! let base = Path::new("code-snippets/stylus");
//! let engine = CheckEngine::new(CheckConfig::load_from_dir(base)?);
//! let summary = engine.scan(base)?;
//! print!("{}", reporter::render_scan(&summary, engine.subject()));
//! # Ok::<(), pulse_check_engine::error::CheckError>(())
//! ```

pub mod checkers;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod reporter;
pub mod types;
