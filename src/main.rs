use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod api;
mod catalog;
mod cli;
mod commands;
mod config;
mod notify;
mod session;
mod wishlist;

use cli::{Cli, Commands};
use config::{Config, LogLevel};
use notify::ConsoleNotifier;

fn setup_logging(log_level: LogLevel, verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agentdir")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("agentdir.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    let from_env = std::env::var("RUST_LOG").is_ok();
    if from_env {
        builder.parse_default_env();
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        if verbose && !from_env { "debug" } else { log_level.as_filter() },
        if from_env { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let notifier = ConsoleNotifier::new(cli.quiet);

    match cli.command {
        Commands::Agents { action } => commands::agents::run(action, &config, &notifier),
        Commands::Wishlist { action } => commands::wishlist::run(action, &config, &notifier),
        Commands::Auth { action } => commands::auth::run(action, &config, &notifier),
        Commands::Contact { name, email, message } => commands::contact::run(name, email, message, &config, &notifier),
        Commands::Newsletter { action } => commands::newsletter::run(action, &config, &notifier),
        Commands::Config { action } => commands::config::run(action, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with log level from config (or RUST_LOG env var)
    setup_logging(config.log_level, cli.verbose).context("Failed to setup logging")?;

    info!("Starting agentdir with config from: {:?}", cli.config);
    info!("Directory API: {}", config.api.base_url);

    // Run the command
    run(cli, config).context("Command failed")?;

    Ok(())
}
