use colored::*;
use eyre::{Context, Result};

use super::print_structured;
use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Get { key } => get(&key, config),
        ConfigAction::Set { key, value } => set(&key, &value),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    if format != OutputFormat::Text {
        return print_structured(format, config);
    }

    println!("{}", "agentdir Configuration".bold());
    println!();

    println!("{}:", "api".cyan());
    println!("  base_url: {}", config.api.base_url);
    println!("  timeout_secs: {}", config.api.timeout_secs);
    println!();

    println!("{}: {}", "log_level".cyan(), config.log_level.as_filter());
    println!("{}: {}", "session".cyan(), Config::token_path().display());

    Ok(())
}

fn get(key: &str, config: &Config) -> Result<()> {
    let value = match key {
        "api.base_url" => Some(config.api.base_url.clone()),
        "api.timeout_secs" => Some(config.api.timeout_secs.to_string()),
        "log_level" | "log-level" => Some(config.log_level.as_filter().to_string()),
        _ => None,
    };

    match value {
        Some(v) => println!("{}", v),
        None => {
            eprintln!("{} Unknown config key: {}", "✗".red(), key);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    println!("{} Setting {} = {}", "→".blue(), key.cyan(), value.green());

    // Start from the file so env overrides are not persisted
    let mut new_config = Config::stored()?;

    match key {
        "api.base_url" => new_config.api.base_url = value.trim_end_matches('/').to_string(),
        "api.timeout_secs" => {
            new_config.api.timeout_secs = value.parse().context("Invalid timeout (use a whole number of seconds)")?;
        }
        "log_level" | "log-level" => new_config.log_level = value.parse()?,
        _ => {
            eyre::bail!("Unknown config key: {}", key);
        }
    }

    let config_path = new_config.save()?;
    println!("  {} Saved to {}", "✓".green(), config_path.display());

    Ok(())
}
