//! Login session commands

use colored::*;
use eyre::Result;
use serde::Serialize;

use super::{client, print_structured, restore_session};
use crate::api::User;
use crate::cli::{AuthAction, OutputFormat};
use crate::config::Config;
use crate::notify::Notifier;
use crate::session::{Session, SessionState, TokenStore};

pub fn run(action: AuthAction, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    match action {
        AuthAction::Login { email, password } => login(&email, &password, config, notifier),
        AuthAction::Logout => logout(config, notifier),
        AuthAction::Whoami { format } => whoami(OutputFormat::resolve(format), config),
    }
}

fn login(email: &str, password: &str, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    let api = client(config);
    let mut session = Session::new();

    let user = match session.login(api.as_ref(), email, password, notifier) {
        Ok(user) => user,
        Err(e) => {
            log::error!("Login failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(token) = session.token() {
        TokenStore::new(Config::token_path()).save(token)?;
    }

    println!(
        "{} Logged in as {}{}",
        "→".blue(),
        user.email.as_deref().unwrap_or(email).cyan(),
        if user.is_admin { " (admin)".yellow().to_string() } else { String::new() }
    );
    Ok(())
}

fn logout(config: &Config, notifier: &dyn Notifier) -> Result<()> {
    let api = client(config);
    let store = TokenStore::new(Config::token_path());
    let mut session = restore_session(api.as_ref());

    if !session.is_authenticated() {
        store.clear()?;
        println!("{}", "Not logged in".dimmed());
        return Ok(());
    }

    if session.logout(api.as_ref(), notifier).is_err() {
        std::process::exit(1);
    }
    store.clear()?;
    Ok(())
}

#[derive(Serialize)]
struct WhoamiOutput<'a> {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a User>,
}

fn whoami(format: OutputFormat, config: &Config) -> Result<()> {
    let api = client(config);
    let session = restore_session(api.as_ref());

    if format != OutputFormat::Text {
        let output = WhoamiOutput {
            authenticated: session.is_authenticated(),
            user: session.user(),
        };
        return print_structured(format, &output);
    }

    match session.state() {
        SessionState::Authenticated(user) => {
            println!("{} {}", "User:".bold(), user.name.as_deref().unwrap_or("-").green());
            println!("{} {}", "Email:".bold(), user.email.as_deref().unwrap_or("-"));
            if user.is_admin {
                println!("{} {}", "Role:".bold(), "admin".yellow());
            }
        }
        SessionState::Failed(reason) => println!("{} {}", "Session check failed:".red(), reason),
        _ => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}
