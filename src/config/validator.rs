//! Configuration validator for winproc
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{Config, ConfigError, LoggingConfig, ModulesConfig, WaitConfig};
use crate::core::types::INFINITE;

/// Longest module path the bounded name query can be asked for
pub const MAX_NAME_CAPACITY: usize = 32767;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_modules(&config.modules)?;
        Self::validate_wait(&config.wait)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    /// Validates module enumeration buffers
    fn validate_modules(modules: &ModulesConfig) -> Result<(), ConfigError> {
        if modules.initial_capacity == 0 {
            return Err(ConfigError::Invalid(
                "Initial module capacity must be at least 1".to_string(),
            ));
        }

        if modules.name_capacity == 0 || modules.name_capacity > MAX_NAME_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "Module name capacity must be between 1 and {}",
                MAX_NAME_CAPACITY
            )));
        }

        if modules.max_growth_rounds == 0 {
            return Err(ConfigError::Invalid(
                "Module list growth rounds must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates wait settings
    fn validate_wait(wait: &WaitConfig) -> Result<(), ConfigError> {
        // Infinite is spelled by leaving the value out
        if wait.default_timeout_ms == Some(INFINITE) {
            return Err(ConfigError::Invalid(format!(
                "Default timeout {} is the infinite sentinel; omit it instead",
                INFINITE
            )));
        }

        Ok(())
    }

    /// Validates logging configuration
    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, valid_levels
            )));
        }

        if logging.file.is_empty() {
            return Err(ConfigError::Invalid(
                "Log file path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
