//! Global configuration management
//!
//! User settings stored in ~/.hashtree/config.toml

use crate::core::error::{HashTreeError, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Log levels accepted by `log.level`
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Global configuration for hashtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Output configuration
    pub output: OutputConfig,
    /// Logging configuration
    pub log: LogConfig,
    /// Demo run configuration
    pub demo: DemoConfig,
}

/// How digests are rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Print digests in uppercase hex
    pub uppercase: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub level: String,
}

/// Parameters of the `demo` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of random leaves
    pub leaf_count: usize,
    /// Length of every random message in bytes
    pub message_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            leaf_count: 100_000,
            message_length: 32,
        }
    }
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Number(i64),
    Boolean(bool),
}

impl ConfigValue {
    /// Parse a command-line value: booleans, then integers, then strings
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => ConfigValue::Boolean(true),
            "false" => ConfigValue::Boolean(false),
            _ => raw
                .parse::<i64>()
                .map(ConfigValue::Number)
                .unwrap_or_else(|_| ConfigValue::String(raw.to_string())),
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Configuration key for getting and setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    OutputUppercase,
    LogLevel,
    DemoLeafCount,
    DemoMessageLength,
}

impl ConfigKey {
    /// Every known key, in listing order
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::DemoLeafCount,
        ConfigKey::DemoMessageLength,
        ConfigKey::LogLevel,
        ConfigKey::OutputUppercase,
    ];

    pub fn from_str(key: &str) -> Option<Self> {
        match key {
            "output.uppercase" => Some(ConfigKey::OutputUppercase),
            "log.level" => Some(ConfigKey::LogLevel),
            "demo.leaf_count" => Some(ConfigKey::DemoLeafCount),
            "demo.message_length" => Some(ConfigKey::DemoMessageLength),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            ConfigKey::OutputUppercase => "output.uppercase",
            ConfigKey::LogLevel => "log.level",
            ConfigKey::DemoLeafCount => "demo.leaf_count",
            ConfigKey::DemoMessageLength => "demo.message_length",
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            // Return default configuration if file doesn't exist
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: GlobalConfig = toml::from_str(&content).map_err(|e| {
            HashTreeError::configuration(format!("Failed to parse global config: {}", e))
        })?;

        Ok(config)
    }

    /// Save global configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            HashTreeError::configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the path to the global configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(HashTreeError::HomeDirectoryNotFound)?;

        let config_dir = user_dirs.home_dir().join(".hashtree");
        Ok(config_dir.join("config.toml"))
    }

    /// Get a configuration value
    pub fn get(&self, key: ConfigKey) -> ConfigValue {
        match key {
            ConfigKey::OutputUppercase => ConfigValue::Boolean(self.output.uppercase),
            ConfigKey::LogLevel => ConfigValue::String(self.log.level.clone()),
            ConfigKey::DemoLeafCount => ConfigValue::Number(self.demo.leaf_count as i64),
            ConfigKey::DemoMessageLength => ConfigValue::Number(self.demo.message_length as i64),
        }
    }

    /// Set a configuration value
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> Result<()> {
        match key {
            ConfigKey::OutputUppercase => {
                self.output.uppercase = value.as_boolean().ok_or_else(|| {
                    HashTreeError::configuration("output.uppercase must be a boolean")
                })?;
            }
            ConfigKey::LogLevel => {
                let level = value
                    .as_string()
                    .map(str::to_ascii_lowercase)
                    .filter(|level| LOG_LEVELS.contains(&level.as_str()))
                    .ok_or_else(|| {
                        HashTreeError::configuration(format!(
                            "log.level must be one of: {}",
                            LOG_LEVELS.join(", ")
                        ))
                    })?;
                self.log.level = level;
            }
            ConfigKey::DemoLeafCount => {
                self.demo.leaf_count = positive(key, &value)?;
            }
            ConfigKey::DemoMessageLength => {
                self.demo.message_length = positive(key, &value)?;
            }
        }
        Ok(())
    }

    /// Reset a configuration value to its default
    pub fn unset(&mut self, key: ConfigKey) {
        let defaults = GlobalConfig::default();
        match key {
            ConfigKey::OutputUppercase => self.output.uppercase = defaults.output.uppercase,
            ConfigKey::LogLevel => self.log.level = defaults.log.level,
            ConfigKey::DemoLeafCount => self.demo.leaf_count = defaults.demo.leaf_count,
            ConfigKey::DemoMessageLength => {
                self.demo.message_length = defaults.demo.message_length
            }
        }
    }

    /// List all configuration values, sorted by key
    pub fn list(&self) -> Vec<(String, String)> {
        ConfigKey::ALL
            .iter()
            .map(|key| (key.to_str().to_string(), self.get(*key).to_string()))
            .collect()
    }
}

fn positive(key: ConfigKey, value: &ConfigValue) -> Result<usize> {
    value
        .as_number()
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            HashTreeError::configuration(format!("{} must be a positive number", key.to_str()))
        })
}
