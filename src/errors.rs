// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! These cover setup concerns (config, logging). Failures of the work an
//! interactor runs are captured separately by
//! [`ExecutionError`](crate::result::ExecutionError).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InflightError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, InflightError>;
