// src/logging.rs

//! Logging setup for `inflight` using `tracing` + `tracing-subscriber`.
//!
//! The library itself only emits `tracing` events; applications that want
//! them printed call [`init_logging`] once at startup.
//!
//! Priority for determining the log level:
//! 1. explicit `level` argument (if provided)
//! 2. `INFLIGHT_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR.

use tracing_subscriber::fmt;

use crate::errors::{InflightError, Result};
use crate::types::LogLevel;

/// Environment variable consulted when no explicit level is given.
pub const LOG_ENV_VAR: &str = "INFLIGHT_LOG";

/// Initialise global logging subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: Option<LogLevel>) -> Result<()> {
    let level = resolve_level(level, std::env::var(LOG_ENV_VAR).ok().as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| InflightError::Logging(e.to_string()))?;

    Ok(())
}

/// Pick the effective level from an explicit choice and the env value.
pub fn resolve_level(explicit: Option<LogLevel>, env_value: Option<&str>) -> tracing::Level {
    match explicit {
        Some(lvl) => lvl.into(),
        None => env_value
            .and_then(|s| s.parse::<LogLevel>().ok())
            .map(tracing::Level::from)
            .unwrap_or(tracing::Level::INFO),
    }
}
