// src/config/mod.rs

//! Configuration loading and validation for inflight.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk or a string (`loader.rs`).
//! - Validate basic invariants like non-zero timeouts (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_from_str};
pub use model::{
    ConfigFile, InteractorConfig, InteractorSection, LoggingSection, RawConfigFile,
    DEFAULT_AMBIENT_DEBOUNCE, DEFAULT_TIMEOUT,
};
