use eyre::Result;

use super::client;
use crate::api::ContactForm;
use crate::config::Config;
use crate::notify::Notifier;

pub fn run(name: String, email: String, message: String, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    let form = ContactForm {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        message: message.trim().to_string(),
    };

    if form.name.is_empty() || form.email.is_empty() || form.message.is_empty() {
        notifier.error("Please fill in your name, email and message.");
        return Ok(());
    }

    match client(config).submit_contact(&form) {
        Ok(reply) => {
            notifier.success(
                reply
                    .as_deref()
                    .unwrap_or("Your message has been sent successfully!"),
            );
        }
        Err(e) => {
            log::error!("Contact form submission failed: {}", e);
            notifier.error(
                e.server_message()
                    .unwrap_or("There was an error submitting the form."),
            );
        }
    }

    Ok(())
}
