//! Tracing subscriber setup for binaries and tests that embed winproc
//!
//! The library itself only emits events; nothing is printed unless the host
//! installs a subscriber, for example through [`init`].

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Builds the event filter: `RUST_LOG` wins over the configured level
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level {:?}", config.level)),
    }
}

/// Installs a stderr subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already set, so repeated
/// calls are harmless.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    Ok(installed)
}

/// Installs a subscriber appending plain-text events to the configured file
pub fn init_to_file(config: &LoggingConfig) -> Result<bool> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .with_context(|| format!("failed to open log file {}", config.file))?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_from_config() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "debug".to_string(),
            file: "unused.log".to_string(),
        };
        let filter = env_filter(&config).unwrap();
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        let config = LoggingConfig::default();
        let first = init(&config).unwrap();
        let second = init(&config).unwrap();
        // At most one call can install the global subscriber
        assert!(!(first && second));
        assert!(!second);
    }

    #[test]
    fn test_init_to_missing_directory_fails() {
        let config = LoggingConfig {
            level: "info".to_string(),
            file: "/nonexistent-dir-for-winproc/sub/winproc.log".to_string(),
        };
        let err = init_to_file(&config).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));
    }
}
