// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::types::LogLevel;

/// Invocation timeout used when the caller does not pass one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Quiescence window applied to busy states caused by ambient work.
pub const DEFAULT_AMBIENT_DEBOUNCE: Duration = Duration::from_secs(5);

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [interactor]
/// default_timeout_ms = 300000
/// ambient_debounce_ms = 5000
///
/// [logging]
/// level = "debug"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub interactor: InteractorSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// `[interactor]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractorSection {
    /// Default per-invocation timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// How long a busy state caused by ambient work must hold before it is
    /// published, in milliseconds. `0` disables the debounce.
    #[serde(default = "default_ambient_debounce_ms")]
    pub ambient_debounce_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_ambient_debounce_ms() -> u64 {
    DEFAULT_AMBIENT_DEBOUNCE.as_millis() as u64
}

impl Default for InteractorSection {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
            ambient_debounce_ms: default_ambient_debounce_ms(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Overrides `INFLIGHT_LOG` when set.
    pub level: Option<LogLevel>,
}

/// Validated configuration.
///
/// Built from [`RawConfigFile`] via `TryFrom`, see `validate.rs`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub interactor: InteractorConfig,
    pub log_level: Option<LogLevel>,
}

/// Settings an [`Interactor`](crate::interactor::Interactor) is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractorConfig {
    pub default_timeout: Duration,
    pub ambient_debounce: Duration,
}

impl Default for InteractorConfig {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT,
            ambient_debounce: DEFAULT_AMBIENT_DEBOUNCE,
        }
    }
}

impl InteractorConfig {
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_ambient_debounce(mut self, window: Duration) -> Self {
        self.ambient_debounce = window;
        self
    }
}
