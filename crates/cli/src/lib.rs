//! Common utilities for the command line interface.
use anyhow::Result;
use ir::ParsedProgram;
use pkb::Pkb;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod cfg;
pub mod config;
pub mod facts;
pub mod output;
pub mod query;
pub mod run;
pub mod ui;

/// Environment variable holding an `EnvFilter` directive that overrides the
/// configured log level.
pub const LOG_ENV: &str = "SPA_LOG";

/// Resolves the log level from the command line flags and the configured
/// level. `--quiet` wins over `--debug`.
///
/// # Example
///
/// ```
/// use spa::log_level;
/// use tracing::level_filters::LevelFilter;
/// assert_eq!(log_level(false, true, "info"), LevelFilter::OFF);
/// assert_eq!(log_level(true, false, "info"), LevelFilter::DEBUG);
/// assert_eq!(log_level(false, false, "warn"), LevelFilter::WARN);
/// assert_eq!(log_level(false, false, "loud"), LevelFilter::INFO);
/// ```
pub fn log_level(debug: bool, quiet: bool, configured: &str) -> LevelFilter {
    if quiet {
        LevelFilter::OFF
    } else if debug {
        LevelFilter::DEBUG
    } else {
        configured.parse().unwrap_or(LevelFilter::INFO)
    }
}

/// Installs the stderr subscriber. [`LOG_ENV`] replaces the computed level
/// unless `--quiet` was given.
pub fn init_logging(debug: bool, quiet: bool, configured: &str) {
    let level = log_level(debug, quiet, configured);
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) if !quiet => filter,
        _ => EnvFilter::default().add_directive(level.into()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    if debug && !quiet {
        debug!("Debug mode enabled");
    }
}

/// Parses a SIMPLE source file and builds its knowledge base.
pub fn load_program(path: &Path) -> Result<(ParsedProgram, Pkb)> {
    let parsed = parsers::parse_file(path)?;
    let pkb = Pkb::from_program(&parsed);
    info!(
        source = %path.display(),
        procedures = parsed.program.procedures.len(),
        statements = parsed.numbers.len(),
        "Program loaded"
    );
    Ok((parsed, pkb))
}
