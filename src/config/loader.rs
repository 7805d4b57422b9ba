//! Configuration loader for winproc
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::default_config;
use super::validator::validate_config;
use crate::core::types::Timeout;
use crate::process::startup::ShowWindow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name `load_config` reads from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "winproc.toml";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_launch")]
    pub launch: LaunchConfig,

    #[serde(default = "default_modules")]
    pub modules: ModulesConfig,

    #[serde(default = "default_wait")]
    pub wait: WaitConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Defaults applied to every process launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default = "default_inherit_handles")]
    pub inherit_handles: bool,
    #[serde(default = "default_new_console")]
    pub new_console: bool,
    #[serde(default = "default_show_window")]
    pub show_window: ShowWindow,
    #[serde(default = "default_suspended")]
    pub suspended: bool,
}

/// Buffer sizing for module enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulesConfig {
    /// Module handles the first query has room for
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// UTF-16 units per module path; longer paths are truncated
    #[serde(default = "default_name_capacity")]
    pub name_capacity: usize,
    #[serde(default = "default_max_growth_rounds")]
    pub max_growth_rounds: usize,
}

/// Wait settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    #[serde(default)]
    pub default_timeout_ms: Option<u32>,
}

impl WaitConfig {
    /// Configured default timeout, infinite when unset
    pub fn default_timeout(&self) -> Timeout {
        Timeout::from(self.default_timeout_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration, or returns defaults when the file doesn't exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Loads and validates configuration from the default location
pub fn load_config() -> Result<Config, ConfigError> {
    let config = ConfigLoader::new(DEFAULT_CONFIG_FILE).load_or_default()?;
    validate_config(&config)?;
    Ok(config)
}

// Default functions for serde
fn default_launch() -> LaunchConfig {
    let defaults = default_config();
    LaunchConfig {
        inherit_handles: defaults.launch.inherit_handles,
        new_console: defaults.launch.new_console,
        show_window: defaults.launch.show_window,
        suspended: defaults.launch.suspended,
    }
}

fn default_modules() -> ModulesConfig {
    let defaults = default_config();
    ModulesConfig {
        initial_capacity: defaults.modules.initial_capacity,
        name_capacity: defaults.modules.name_capacity,
        max_growth_rounds: defaults.modules.max_growth_rounds,
    }
}

fn default_wait() -> WaitConfig {
    WaitConfig {
        default_timeout_ms: default_config().wait.default_timeout_ms,
    }
}

fn default_logging() -> LoggingConfig {
    let defaults = default_config();
    LoggingConfig {
        level: defaults.logging.level,
        file: defaults.logging.file,
    }
}

// Individual field defaults
fn default_inherit_handles() -> bool {
    default_config().launch.inherit_handles
}

fn default_new_console() -> bool {
    default_config().launch.new_console
}

fn default_show_window() -> ShowWindow {
    default_config().launch.show_window
}

fn default_suspended() -> bool {
    default_config().launch.suspended
}

fn default_initial_capacity() -> usize {
    default_config().modules.initial_capacity
}

fn default_name_capacity() -> usize {
    default_config().modules.name_capacity
}

fn default_max_growth_rounds() -> usize {
    default_config().modules.max_growth_rounds
}

fn default_log_level() -> String {
    default_config().logging.level
}

fn default_log_file() -> String {
    default_config().logging.file
}

impl Default for Config {
    fn default() -> Self {
        Config {
            launch: default_launch(),
            modules: default_modules(),
            wait: default_wait(),
            logging: default_logging(),
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        default_launch()
    }
}

impl Default for ModulesConfig {
    fn default() -> Self {
        default_modules()
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        default_wait()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        default_logging()
    }
}
