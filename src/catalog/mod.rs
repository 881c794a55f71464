//! Agent catalog
//!
//! Holds the agents and filter options fetched from the directory API, plus
//! the pure filtering/grouping derivations over them:
//! - `filter` - per-dimension filter selection with sentinel/reset semantics
//! - `engine` - filter and group-by-category functions
//! - `loader` - concurrent catalog/option fetches with explicit load states

pub mod engine;
pub mod filter;
pub mod loader;

use serde::{Deserialize, Serialize};

/// A directory entry for a third-party AI tool or service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Stable, unique identifier
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub short_description: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub industry: String,

    #[serde(default)]
    pub access_model: String,

    #[serde(default)]
    pub pricing_model: String,

    /// How many users have this agent on their wishlist
    #[serde(default)]
    pub saved_by_count: u64,

    #[serde(default)]
    pub key_features: Vec<String>,

    #[serde(default)]
    pub use_cases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    #[serde(default)]
    pub tried_by: u64,
}

/// Allowed values for each filter dimension, as served by `/agents/filters`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptionSet {
    pub access_models: Vec<String>,
    pub pricing_models: Vec<String>,
    pub categories: Vec<String>,
    pub industries: Vec<String>,
}

/// In-memory collection of the agents fetched for this session
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    agents: Vec<Agent>,
}

impl CatalogStore {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// All agents, in the order the API returned them
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Overwrite the save counter of one agent with an authoritative value.
    ///
    /// This is the only local mutation the store allows. Returns `false` when
    /// no agent with `id` is present.
    pub fn set_saved_count(&mut self, id: &str, count: u64) -> bool {
        match self.agents.iter_mut().find(|a| a.id == id) {
            Some(agent) => {
                agent.saved_by_count = count;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
