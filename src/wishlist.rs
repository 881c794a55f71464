//! Wishlist toggling
//!
//! The remote call flips membership and returns the authoritative save count,
//! which replaces the local counter as-is. Concurrent toggles for the same
//! agent are not coordinated: whichever response is applied last wins.

use thiserror::Error;

use crate::api::{ApiError, DirectoryApi};
use crate::catalog::CatalogStore;
use crate::notify::Notifier;
use crate::session::Session;

/// Status the server uses to report the agent was removed from the wishlist
const STATUS_REMOVED: u16 = 201;

/// Result of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishlistToggle {
    pub new_count: u64,
    /// `true` if the agent is now on the wishlist, `false` if it was removed
    pub added: bool,
}

#[derive(Debug, Error)]
pub enum ActionFailure {
    #[error("not logged in")]
    NotAuthenticated,

    #[error("failed to update wishlist for agent {agent_id}: {source}")]
    Remote {
        agent_id: String,
        #[source]
        source: ApiError,
    },
}

pub struct WishlistAdapter<'a> {
    api: &'a dyn DirectoryApi,
    notifier: &'a dyn Notifier,
}

impl<'a> WishlistAdapter<'a> {
    pub fn new(api: &'a dyn DirectoryApi, notifier: &'a dyn Notifier) -> Self {
        Self { api, notifier }
    }

    /// Flip wishlist membership for `agent_id` and apply the returned count.
    ///
    /// On failure the store is left untouched. No retry is attempted.
    pub fn toggle(
        &self,
        session: &Session,
        store: &mut CatalogStore,
        agent_id: &str,
    ) -> Result<WishlistToggle, ActionFailure> {
        let Some(token) = session.token() else {
            self.notifier.error("Please log in to save agents to your wishlist.");
            return Err(ActionFailure::NotAuthenticated);
        };

        let reply = match self.api.toggle_wishlist(agent_id, token) {
            Ok(reply) => reply,
            Err(source) => {
                log::warn!("Wishlist toggle for {} failed: {}", agent_id, source);
                self.notifier.error("An error occurred while updating the wishlist.");
                return Err(ActionFailure::Remote {
                    agent_id: agent_id.to_string(),
                    source,
                });
            }
        };

        let added = reply.status != STATUS_REMOVED;
        if !store.set_saved_count(agent_id, reply.saved_by_count) {
            log::debug!("Agent {} not in catalog, save count not stored", agent_id);
        }

        log::info!(
            "Wishlist {} {} (saved by {})",
            if added { "added" } else { "removed" },
            agent_id,
            reply.saved_by_count
        );
        self.notifier.success(if added {
            "Agent added to wishlist!"
        } else {
            "Agent removed from wishlist!"
        });

        Ok(WishlistToggle {
            new_count: reply.saved_by_count,
            added,
        })
    }
}
