//! Configuration command implementation

use crate::config::{ConfigKey, ConfigValue, GlobalConfig};
use anyhow::Result;
use colored::Colorize;

/// Execute the config command
pub fn execute(
    key: Option<String>,
    value: Option<String>,
    list: bool,
    unset: bool,
    show_origin: bool,
    json: bool,
) -> Result<()> {
    let mut config = GlobalConfig::load()?;

    if show_origin {
        let config_path = GlobalConfig::get_config_path()?;
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": config_path.display().to_string(),
                    "exists": config_path.exists()
                })
            );
        } else {
            println!(
                "{}: {}",
                "Configuration file".bold(),
                config_path.display().to_string().cyan()
            );
            if config_path.exists() {
                println!("{}: {}", "Status".bold(), "exists".green());
            } else {
                println!("{}: {}", "Status".bold(), "not created yet".yellow());
            }
        }
        return Ok(());
    }

    if list {
        return list_configuration(&config, json);
    }

    let Some(key_str) = key else {
        show_usage();
        return Ok(());
    };

    let config_key = ConfigKey::from_str(&key_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid configuration key: {}", key_str))?;

    if unset {
        config.unset(config_key);
        config.save()?;

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "action": "unset",
                    "key": key_str,
                    "status": "success"
                })
            );
        } else {
            println!("{} {}", "✓".green(), format!("Unset {}", key_str).bold());
        }
    } else if let Some(value_str) = value {
        config.set(config_key, ConfigValue::parse(&value_str))?;
        config.save()?;

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "action": "set",
                    "key": key_str,
                    "value": value_str,
                    "status": "success"
                })
            );
        } else {
            println!("{} {} = {}", "✓".green(), key_str.bold(), value_str.cyan());
        }
    } else {
        let value = config.get(config_key);
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "key": key_str,
                    "value": value
                })
            );
        } else {
            println!("{}", value);
        }
    }

    Ok(())
}

/// List all configuration values
fn list_configuration(config: &GlobalConfig, json: bool) -> Result<()> {
    let entries = config.list();

    if json {
        let config_map: std::collections::BTreeMap<String, String> = entries.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&config_map)?);
    } else {
        println!("{}", "Global Configuration".green().bold());
        println!("{}", "═".repeat(40));
        println!();

        for (key, value) in entries {
            println!("{} = {}", key.bold(), value.cyan());
        }
    }

    Ok(())
}

fn show_usage() {
    println!("{}", "Configuration Management".green().bold());
    println!("{}", "═".repeat(40));
    println!();
    println!("{}", "Usage:".bold());
    println!("  {} Get value", "hashtree config <key>".cyan());
    println!("  {} Set value", "hashtree config <key> <value>".cyan());
    println!("  {} List all", "hashtree config --list".cyan());
    println!("  {} Unset value", "hashtree config --unset <key>".cyan());
    println!();
    println!("{}", "Keys:".bold());
    println!("  {} Print digests in uppercase", "output.uppercase".green());
    println!("  {} Default log filter", "log.level".green());
    println!("  {} Leaves in a demo run", "demo.leaf_count".green());
    println!("  {} Bytes per demo message", "demo.message_length".green());
}
