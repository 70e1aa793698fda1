//! Configuration management for dailylog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::logging::{self, Console, Level, Logger, LoggerBuilder};

/// Logger configuration
///
/// Only applied by the call that creates the process-wide logger; see
/// [`logging::get_logger`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory for log files (default: "logs", relative to the working directory)
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Minimum level: DEBUG, INFO, WARNING, ERROR or CRITICAL (unknown values mean DEBUG)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Echo log lines to stdout
    #[serde(default = "default_true")]
    pub console: bool,

    /// Color console output by level
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(logging::DEFAULT_LOG_DIR)
}

fn default_min_level() -> String {
    "DEBUG".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            min_level: default_min_level(),
            console: true,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from the default file, or return default if not found
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to a file, creating its parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Parsed minimum level, with the DEBUG fallback applied
    pub fn level(&self) -> Level {
        Level::from_config(&self.min_level)
    }

    /// Console sink described by this configuration
    pub fn console_sink(&self) -> Console {
        if self.console {
            Console::new(Box::new(std::io::stdout()), self.color)
        } else {
            Console::disabled()
        }
    }

    /// Logger builder carrying every setting from this configuration
    pub fn builder(&self) -> LoggerBuilder {
        Logger::builder(self.log_dir.clone())
            .min_level(self.level())
            .console(self.console_sink())
    }
}

/// Get the process-wide logger, creating it from `config` on first use
///
/// Later calls return the existing logger whatever `config` says.
pub fn get_logger_with_config(config: &Config) -> Result<Arc<Logger>> {
    logging::get_logger_with(|| config.builder()).with_context(|| {
        format!(
            "Failed to initialize logger in {}",
            config.log_dir.display()
        )
    })
}

/// Get the base configuration directory (e.g. ~/.config/dailylog)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dailylog"))
}

/// Get the path to the default config file
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.min_level, "DEBUG");
        assert!(config.console);
        assert!(config.color);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.min_level = "WARNING".to_string();
        config.color = false;

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: Config = toml::from_str("min_level = \"info\"").unwrap();
        assert_eq!(parsed.log_dir, PathBuf::from("logs"));
        assert_eq!(parsed.level(), Level::Info);
        assert!(parsed.console);
    }

    #[test]
    fn test_unknown_level_falls_back_to_debug() {
        let parsed: Config = toml::from_str("min_level = \"loud\"").unwrap();
        assert_eq!(parsed.level(), Level::Debug);
    }

    #[test]
    fn test_save_and_load_from() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let config = Config {
            log_dir: temp_dir.path().join("logs"),
            min_level: "ERROR".to_string(),
            console: false,
            color: false,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "log_dir = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_builder_applies_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            log_dir: temp_dir.path().join("logs"),
            min_level: "critical".to_string(),
            console: false,
            color: true,
        };

        let logger = config.builder().build().unwrap();
        assert_eq!(logger.min_level(), Level::Critical);
        assert_eq!(logger.log_dir(), temp_dir.path().join("logs"));
    }

    #[test]
    fn test_config_file_path_is_under_config_dir() {
        // CI machines may have no config dir, so only check when one exists
        if let Some(path) = config_file_path() {
            assert!(path.ends_with("dailylog/config.toml"));
        }
    }
}
