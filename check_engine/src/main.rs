//! `pulse-check` — validate Stylus contracts and Orbit chain scripts.
//!
//! With a FILENAME, checks that one file (relative to `--dir`). Without one,
//! scans every matching file in `--dir`.
//!
//! Exit codes: 0 = report produced, 1 = file or directory unreadable, missing
//! filename, JSON serialization failure, or (with `--strict`) a file with
//! issues, 2 = config error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pulse_check_engine::checkers::Profile;
use pulse_check_engine::config::{CheckConfig, ConfigError};
use pulse_check_engine::engine::CheckEngine;
use pulse_check_engine::error::CheckError;
use pulse_check_engine::reporter;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "PULSE_CHECK_LOG";

/// Heuristic static checks for Arbitrum Pulse code snippets
#[derive(Parser)]
#[command(name = "pulse-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to check, relative to the base directory (omit to scan the directory)
    filename: Option<String>,

    /// Base directory holding the files to check
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Check profile (overrides the config file)
    #[arg(short, long, value_parser = ["stylus", "orbit"])]
    profile: Option<String>,

    /// Explicit config file (TOML, or YAML by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when any file is missing critical elements
    #[arg(long)]
    strict: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<CheckConfig, CheckError> {
    let mut config = match cli.config {
        Some(ref path) => CheckConfig::load_from_file(path)?,
        None => CheckConfig::load_from_dir(&cli.dir)?,
    };

    if let Some(ref name) = cli.profile {
        config.profile = name
            .parse::<Profile>()
            .map_err(ConfigError::UnknownProfile)?;
    }
    if cli.strict {
        config.fail_on_issues = true;
    }
    Ok(config)
}

/// Failure of a run after the configuration was resolved.
enum RunError {
    Check(CheckError),
    Output(String),
}

impl From<CheckError> for RunError {
    fn from(e: CheckError) -> Self {
        Self::Check(e)
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Check(e) => write!(f, "{e}"),
            Self::Output(msg) => write!(f, "{msg}"),
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), RunError> {
    let json = reporter::to_json(value).map_err(RunError::Output)?;
    println!("{json}");
    Ok(())
}

/// Single-file mode. Returns whether the file passed.
fn run_single(
    engine: &CheckEngine,
    base: &Path,
    filename: &str,
    json: bool,
) -> Result<bool, RunError> {
    let report = engine.check_file(base, filename)?;
    if json {
        print_json(&report)?;
    } else {
        print!("{}", reporter::render_single(&report, engine.subject()));
    }
    Ok(report.passed)
}

/// Directory-scan mode. Returns whether every file was valid.
fn run_scan(engine: &CheckEngine, base: &Path, json: bool) -> Result<bool, RunError> {
    let summary = engine.scan(base)?;
    if json {
        print_json(&summary)?;
    } else {
        print!("{}", reporter::render_scan(&summary, engine.subject()));
    }
    Ok(summary.all_valid())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    let strict = config.fail_on_issues;
    let engine = CheckEngine::new(config);

    let result = match cli.filename {
        Some(ref filename) => run_single(&engine, &cli.dir, filename, cli.json),
        None => run_scan(&engine, &cli.dir, cli.json),
    };

    match result {
        Ok(all_passed) if strict && !all_passed => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
