//! User-visible notifications
//!
//! Every component reports success and failure through a `Notifier` instead of
//! printing directly, so the core stays independent of the terminal.

use colored::*;

pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints status lines to the terminal and mirrors them into the log
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        log::info!("{}", message);
        if !self.quiet {
            eprintln!("{} {}", "✓".green(), message);
        }
    }

    fn error(&self, message: &str) {
        log::warn!("{}", message);
        eprintln!("{} {}", "✗".red(), message);
    }
}
