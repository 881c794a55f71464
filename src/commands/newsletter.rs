use eyre::Result;

use super::client;
use crate::cli::NewsletterAction;
use crate::config::Config;
use crate::notify::Notifier;

pub fn run(action: NewsletterAction, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    match action {
        NewsletterAction::Subscribe { email } => subscribe(email.trim(), config, notifier),
    }
}

fn subscribe(email: &str, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    if email.is_empty() {
        notifier.error("Please enter a valid email address.");
        return Ok(());
    }

    match client(config).subscribe_newsletter(email) {
        Ok(reply) => notifier.success(reply.as_deref().unwrap_or("Subscribed successfully!")),
        Err(e) => {
            log::error!("Newsletter subscription for {} failed: {}", email, e);
            notifier.error(e.server_message().unwrap_or("Subscription failed. Please try again."));
        }
    }

    Ok(())
}
