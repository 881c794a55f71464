//! Directory REST API
//!
//! `DirectoryApi` is the seam between the client core and the remote system of
//! record. `HttpDirectoryApi` talks to the real service; tests substitute a
//! scripted implementation.

mod error;
#[cfg(test)]
pub mod fake;
mod http;

pub use error::{ApiError, Result};
pub use http::HttpDirectoryApi;

use serde::{Deserialize, Serialize};

use crate::catalog::{Agent, FilterOptionSet};

/// An agent together with its closest matches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarAgents {
    pub agent: Agent,
    #[serde(default)]
    pub best_matches: Vec<Agent>,
}

/// A directory user account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Successful login: the user plus the session token the server issued
#[derive(Debug, Clone)]
pub struct LoginReply {
    pub user: User,
    pub token: Option<String>,
}

/// Raw outcome of a wishlist toggle.
///
/// The status code is how the server tells "added" (200) from "removed" (201).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishlistReply {
    pub status: u16,
    pub saved_by_count: u64,
}

/// Contact form submission
#[derive(Debug, Clone, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Operations the client needs from the directory service
pub trait DirectoryApi: Send + Sync {
    /// `GET /agents/all`
    fn fetch_agents(&self) -> Result<Vec<Agent>>;

    /// `GET /agents/filters`
    fn fetch_filter_options(&self) -> Result<FilterOptionSet>;

    /// `GET /agents/similar/{id}`
    fn fetch_similar(&self, agent_id: &str) -> Result<SimilarAgents>;

    /// `POST /users/wishlist/{id}`, flips membership for the session user
    fn toggle_wishlist(&self, agent_id: &str, token: &str) -> Result<WishlistReply>;

    /// `POST /users/login`
    fn login(&self, email: &str, password: &str) -> Result<LoginReply>;

    /// `GET /users/current_user`
    fn current_user(&self, token: &str) -> Result<User>;

    /// `POST /users/logout`
    fn logout(&self, token: &str) -> Result<()>;

    /// `POST /contact`, returns the server's confirmation message if any
    fn submit_contact(&self, form: &ContactForm) -> Result<Option<String>>;

    /// `POST /newsletter/subscribe`, returns the server's confirmation message if any
    fn subscribe_newsletter(&self, email: &str) -> Result<Option<String>>;
}
