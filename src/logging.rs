//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only the forecast report.

use crate::config::LoggingConfig;
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Level directive for a `-v` count, falling back to the configured level
#[must_use]
pub fn level_for(config: &LoggingConfig, verbosity: u8) -> &str {
    match verbosity {
        0 => config.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides everything else.
pub fn init(config: &LoggingConfig, verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(config, verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
