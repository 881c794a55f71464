//! Catalog and filter-option loading
//!
//! The two fetches run concurrently and independently. Each completion is
//! delivered over a channel and applied to the `Directory` as it arrives; a
//! result that arrives after the directory is gone is discarded.

use eyre::{Context, Result};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::engine::{self, CategorizedResult};
use super::filter::FilterSelection;
use super::{Agent, CatalogStore, FilterOptionSet};
use crate::api::{ApiError, DirectoryApi};
use crate::notify::Notifier;

/// Progress of one remote input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// A fetch that did not produce data
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("Failed to load agents: {0}")]
    Catalog(#[source] ApiError),

    #[error("Failed to load filter options: {0}")]
    Options(#[source] ApiError),
}

/// Completion of one of the two startup fetches
#[derive(Debug)]
pub enum LoadEvent {
    Catalog(std::result::Result<Vec<Agent>, ApiError>),
    Options(std::result::Result<FilterOptionSet, ApiError>),
}

/// What the catalog surface should show right now
#[derive(Debug)]
pub enum CatalogView<'a> {
    Loading,
    Failed(&'a str),
    /// Loaded, but nothing matches the selection
    Empty,
    Results(CategorizedResult<'a>),
}

/// Session state: the two loaded inputs plus the user's filter selection
#[derive(Debug)]
pub struct Directory {
    catalog: LoadState<CatalogStore>,
    options: LoadState<FilterOptionSet>,
    selection: FilterSelection,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self {
            catalog: LoadState::Loading,
            options: LoadState::Loading,
            selection: FilterSelection::new(),
        }
    }

    pub fn catalog(&self) -> &LoadState<CatalogStore> {
        &self.catalog
    }

    pub fn options(&self) -> &LoadState<FilterOptionSet> {
        &self.options
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut FilterSelection {
        &mut self.selection
    }

    /// Both fetches have completed, successfully or not
    pub fn is_settled(&self) -> bool {
        !self.catalog.is_loading() && !self.options.is_loading()
    }

    /// Apply one fetch completion; the other input is left untouched
    pub fn apply(&mut self, event: LoadEvent, notifier: &dyn Notifier) {
        match event {
            LoadEvent::Catalog(Ok(agents)) => {
                log::info!("Loaded {} agents", agents.len());
                self.catalog = LoadState::Loaded(CatalogStore::new(agents));
            }
            LoadEvent::Catalog(Err(e)) => {
                self.catalog = LoadState::Failed(report(LoadFailure::Catalog(e), notifier));
            }
            LoadEvent::Options(Ok(options)) => {
                log::info!(
                    "Loaded filter options: {} categories, {} industries, {} pricing models, {} access models",
                    options.categories.len(),
                    options.industries.len(),
                    options.pricing_models.len(),
                    options.access_models.len()
                );
                self.options = LoadState::Loaded(options);
            }
            LoadEvent::Options(Err(e)) => {
                self.options = LoadState::Failed(report(LoadFailure::Options(e), notifier));
            }
        }
    }

    /// Derive the display result from the current catalog and selection
    pub fn view(&self) -> CatalogView<'_> {
        match &self.catalog {
            LoadState::Loading => CatalogView::Loading,
            LoadState::Failed(reason) => CatalogView::Failed(reason),
            LoadState::Loaded(store) => {
                let grouped = engine::categorize(store.agents(), &self.selection);
                if grouped.is_empty() {
                    CatalogView::Empty
                } else {
                    CatalogView::Results(grouped)
                }
            }
        }
    }
}

fn report(failure: LoadFailure, notifier: &dyn Notifier) -> String {
    let message = failure.to_string();
    log::error!("{}", message);
    notifier.error(&message);
    message
}

/// Start both fetches on the runtime's blocking pool.
///
/// The returned receiver yields one event per fetch, in completion order, and
/// closes once both have reported.
pub fn spawn(handle: &Handle, api: Arc<dyn DirectoryApi>) -> UnboundedReceiver<LoadEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    let catalog_api = Arc::clone(&api);
    let catalog_tx = tx.clone();
    handle.spawn_blocking(move || {
        let result = catalog_api.fetch_agents();
        deliver(&catalog_tx, LoadEvent::Catalog(result));
    });

    handle.spawn_blocking(move || {
        let result = api.fetch_filter_options();
        deliver(&tx, LoadEvent::Options(result));
    });

    rx
}

/// Hand a completion to the directory, or drop it if the directory is gone
fn deliver(tx: &UnboundedSender<LoadEvent>, event: LoadEvent) -> bool {
    if tx.send(event).is_err() {
        log::debug!("Directory dropped before load completed, discarding result");
        return false;
    }
    true
}

/// Load a fresh `Directory`, applying each fetch as it completes
pub fn load(api: Arc<dyn DirectoryApi>, notifier: &dyn Notifier) -> Result<Directory> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let mut events = spawn(runtime.handle(), api);

    let mut directory = Directory::new();
    while let Some(event) = events.blocking_recv() {
        directory.apply(event, notifier);
    }

    // A fetch that panicked closes its sender without reporting
    if !directory.is_settled() {
        log::error!(
            "Load ended with inputs still pending (catalog loading: {}, options loading: {})",
            directory.catalog.is_loading(),
            directory.options.is_loading()
        );
    }

    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeApi, agent};
    use crate::catalog::filter::Dimension;
    use crate::notify::recording::RecordingNotifier;

    fn options() -> FilterOptionSet {
        FilterOptionSet {
            categories: vec!["Chat".to_string(), "Coding".to_string()],
            access_models: vec!["Free".to_string(), "Paid".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_new_directory_is_loading() {
        let directory = Directory::new();
        assert!(directory.catalog().is_loading());
        assert!(directory.options().is_loading());
        assert!(!directory.is_settled());
        assert!(matches!(directory.view(), CatalogView::Loading));
    }

    #[test]
    fn test_options_arriving_first_leave_catalog_loading() {
        let notifier = RecordingNotifier::default();
        let mut directory = Directory::new();

        directory.apply(LoadEvent::Options(Ok(options())), &notifier);

        assert_eq!(directory.options().loaded(), Some(&options()));
        assert!(directory.catalog().is_loading());
        assert!(matches!(directory.view(), CatalogView::Loading));

        directory.apply(LoadEvent::Catalog(Ok(vec![agent("1", "Chat", "Free", 0)])), &notifier);
        assert!(directory.is_settled());
        assert!(matches!(directory.view(), CatalogView::Results(_)));
    }

    #[test]
    fn test_load_fetches_both_inputs() {
        let api = FakeApi::new()
            .with_agents(vec![agent("1", "Chat", "Free", 3), agent("2", "Coding", "Paid", 0)])
            .with_options(options());
        let api = Arc::new(api);
        let notifier = RecordingNotifier::default();

        let directory = load(api.clone(), &notifier).unwrap();

        assert!(directory.is_settled());
        assert_eq!(directory.catalog().loaded().map(CatalogStore::len), Some(2));
        assert_eq!(directory.options().loaded(), Some(&options()));
        assert!(notifier.notes().is_empty());

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(calls, vec!["agents", "filters"]);
    }

    #[test]
    fn test_catalog_failure_is_error_state_not_empty() {
        let api = Arc::new(FakeApi::new().failing_agents().with_options(options()));
        let notifier = RecordingNotifier::default();

        let directory = load(api, &notifier).unwrap();

        assert!(directory.catalog().is_failed());
        assert!(directory.options().loaded().is_some());
        match directory.view() {
            CatalogView::Failed(reason) => assert!(reason.starts_with("Failed to load agents")),
            other => panic!("expected failed view, got {:?}", other),
        }
        assert_eq!(notifier.errors().len(), 1);
    }

    #[test]
    fn test_options_failure_does_not_block_catalog() {
        let api = Arc::new(
            FakeApi::new()
                .with_agents(vec![agent("1", "Chat", "Free", 0)])
                .failing_options(),
        );
        let notifier = RecordingNotifier::default();

        let directory = load(api, &notifier).unwrap();

        assert!(directory.options().is_failed());
        assert!(matches!(directory.view(), CatalogView::Results(_)));
        assert!(notifier.errors()[0].starts_with("Failed to load filter options"));
    }

    #[test]
    fn test_view_empty_when_nothing_matches() {
        let notifier = RecordingNotifier::default();
        let mut directory = Directory::new();
        directory.apply(LoadEvent::Catalog(Ok(vec![agent("1", "Chat", "Free", 0)])), &notifier);

        directory.selection_mut().set_filter(Dimension::Category, "Robotics");
        assert!(matches!(directory.view(), CatalogView::Empty));

        directory.selection_mut().reset_filter(Dimension::Category);
        assert!(matches!(directory.view(), CatalogView::Results(_)));
    }

    #[test]
    fn test_view_empty_catalog() {
        let notifier = RecordingNotifier::default();
        let mut directory = Directory::new();
        directory.apply(LoadEvent::Catalog(Ok(Vec::new())), &notifier);
        assert!(matches!(directory.view(), CatalogView::Empty));
    }

    #[test]
    fn test_panicked_fetch_leaves_input_loading() {
        let api = Arc::new(FakeApi::new().panicking_agents().with_options(options()));
        let notifier = RecordingNotifier::default();

        let directory = load(api, &notifier).unwrap();

        assert!(directory.catalog().is_loading());
        assert!(!directory.is_settled());
        assert!(directory.options().loaded().is_some());
        assert!(matches!(directory.view(), CatalogView::Loading));
    }

    #[test]
    fn test_deliver_after_directory_dropped_discards() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        assert!(!deliver(&tx, LoadEvent::Catalog(Ok(Vec::new()))));
    }

    #[test]
    fn test_spawn_with_dropped_receiver_does_not_panic() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let api = Arc::new(FakeApi::new().with_agents(vec![agent("1", "Chat", "Free", 0)]));

        let events = spawn(runtime.handle(), api);
        drop(events);
        runtime.shutdown_timeout(std::time::Duration::from_secs(5));
    }
}
