pub mod agents;
pub mod auth;
pub mod completions;
pub mod config;
pub mod contact;
pub mod newsletter;
pub mod wishlist;

use eyre::Result;
use serde::Serialize;
use std::sync::Arc;
use terminal_size::{Width, terminal_size};

use crate::api::{DirectoryApi, HttpDirectoryApi};
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::session::{Session, TokenStore};

/// Directory API client for the configured endpoint
fn client(config: &Config) -> Arc<dyn DirectoryApi> {
    Arc::new(HttpDirectoryApi::new(&config.api))
}

/// Session resumed from the stored token, unauthenticated if there is none
fn restore_session(api: &dyn DirectoryApi) -> Session {
    let mut session = Session::new();
    if let Some(token) = TokenStore::new(Config::token_path()).load() {
        session.restore(api, token);
    }
    session
}

/// Print a value as JSON or YAML; text rendering is left to the caller
fn print_structured<T: Serialize>(format: OutputFormat, value: &T) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Text => {}
    }
    Ok(())
}

fn term_width() -> usize {
    terminal_size().map(|(Width(w), _)| w as usize).unwrap_or(80)
}

/// Truncate to `max_chars` characters, adding an ellipsis when shortened
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    format!("{}...", s.chars().take(keep).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 10), "a longe...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }
}
