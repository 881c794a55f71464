use colored::*;
use eyre::Result;

use super::{client, restore_session};
use crate::api::DirectoryApi;
use crate::catalog::CatalogStore;
use crate::cli::WishlistAction;
use crate::config::Config;
use crate::notify::Notifier;
use crate::session::Session;
use crate::wishlist::WishlistAdapter;

pub fn run(action: WishlistAction, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    match action {
        WishlistAction::Toggle { agent_id } => toggle(&agent_id, config, notifier),
    }
}

fn toggle(agent_id: &str, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    let api = client(config);
    let session = restore_session(api.as_ref());

    let mut store = catalog_for_toggle(api.as_ref(), &session);

    let adapter = WishlistAdapter::new(api.as_ref(), notifier);
    match adapter.toggle(&session, &mut store, agent_id) {
        Ok(result) => {
            let name = store.get(agent_id).map(|a| a.name.as_str()).unwrap_or(agent_id);
            println!(
                "{} {} {}",
                if result.added { "♥".red() } else { "♡".normal() },
                name.bold(),
                format!("saved by {}", result.new_count).dimmed()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Catalog used to name the toggled agent.
///
/// Only fetched for a logged-in session, since the toggle is refused otherwise.
/// A failed fetch is not fatal.
fn catalog_for_toggle(api: &dyn DirectoryApi, session: &Session) -> CatalogStore {
    if !session.is_authenticated() {
        return CatalogStore::default();
    }

    match api.fetch_agents() {
        Ok(agents) => {
            let store = CatalogStore::new(agents);
            if store.is_empty() {
                log::debug!("Catalog is empty, toggled agent will be shown by id");
            }
            store
        }
        Err(e) => {
            log::warn!("Could not load catalog before wishlist toggle: {}", e);
            CatalogStore::default()
        }
    }
}
