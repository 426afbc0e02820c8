//! Global configuration management for hashtree
//!
//! User settings are stored in ~/.hashtree/config.toml

pub mod global_config;

// Re-export commonly used items
pub use global_config::{ConfigKey, ConfigValue, DemoConfig, GlobalConfig, LogConfig, OutputConfig};
