// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, InteractorConfig, RawConfigFile};
use crate::errors::{InflightError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = InflightError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_interactor_section(&raw)?;
        Ok(ConfigFile {
            interactor: InteractorConfig {
                default_timeout: Duration::from_millis(raw.interactor.default_timeout_ms),
                ambient_debounce: Duration::from_millis(raw.interactor.ambient_debounce_ms),
            },
            log_level: raw.logging.level,
        })
    }
}

fn validate_interactor_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.interactor.default_timeout_ms == 0 {
        return Err(InflightError::ConfigError(
            "[interactor].default_timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
