//! Default configuration values for winproc

use crate::process::startup::ShowWindow;
use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub launch: LaunchDefaults,
    pub modules: ModulesDefaults,
    pub wait: WaitDefaults,
    pub logging: LoggingDefaults,
}

/// Default process launch options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchDefaults {
    pub inherit_handles: bool,
    pub new_console: bool,
    pub show_window: ShowWindow,
    pub suspended: bool,
}

/// Default module enumeration buffers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesDefaults {
    pub initial_capacity: usize,
    pub name_capacity: usize,
    pub max_growth_rounds: usize,
}

/// Default wait settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitDefaults {
    pub default_timeout_ms: Option<u32>,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
    pub file: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        launch: LaunchDefaults {
            inherit_handles: false,
            new_console: false,
            show_window: ShowWindow::ShowNormal,
            suspended: false,
        },
        modules: ModulesDefaults {
            initial_capacity: 1024,
            name_capacity: 256,
            max_growth_rounds: 4,
        },
        wait: WaitDefaults {
            // Absent means wait forever
            default_timeout_ms: None,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
            file: "winproc.log".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_defaults() {
        let config = default_config();
        assert!(!config.launch.inherit_handles);
        assert!(!config.launch.new_console);
        assert!(!config.launch.suspended);
        assert_eq!(config.launch.show_window, ShowWindow::ShowNormal);
    }

    #[test]
    fn test_modules_defaults() {
        let config = default_config();
        assert_eq!(config.modules.initial_capacity, 1024);
        assert_eq!(config.modules.name_capacity, 256);
        assert_eq!(config.modules.max_growth_rounds, 4);
    }

    #[test]
    fn test_wait_and_logging_defaults() {
        let config = default_config();
        assert!(config.wait.default_timeout_ms.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "winproc.log");
    }

    #[test]
    fn test_serialization() {
        let config = default_config();
        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("show_window = \"show_normal\""));
        assert!(serialized.contains("initial_capacity"));

        let deserialized: ConfigDefaults = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.modules.name_capacity, config.modules.name_capacity);
        assert_eq!(deserialized.launch.show_window, config.launch.show_window);
    }
}
