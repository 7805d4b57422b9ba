//! Configuration module for winproc
//!
//! Provides configuration loading, validation, and default settings for
//! process launches, module enumeration, waits and logging. Loading happens
//! once at startup and the resulting values are passed where needed.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{load_config, ConfigLoader, DEFAULT_CONFIG_FILE};
pub use validator::{validate_config, ConfigValidator, MAX_NAME_CAPACITY};

// Re-export the configuration structures
pub use loader::{Config, LaunchConfig, LoggingConfig, ModulesConfig, WaitConfig};

// Configuration-related error type
pub use loader::ConfigError;

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
