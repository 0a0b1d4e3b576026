//! Browse session service
//!
//! Owns the normalized tree for the current view: one tree per loaded
//! collection, replaced wholesale on the next load. All expand/collapse
//! state lives and dies with that tree.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    collapse_all, locate, normalize, toggle, Item, NodeRef, ToggleOutcome,
};
use crate::infrastructure::api::{CollectionApi, CollectionSummary, SearchResults};
use crate::infrastructure::error::ApiError;

/// Session holding the collection currently being browsed.
pub struct BrowseSession {
    api: Arc<dyn CollectionApi>,
    current: Option<Item>,
    current_pid: Option<String>,
}

impl BrowseSession {
    /// Create a session with no collection loaded.
    pub fn new(api: Arc<dyn CollectionApi>) -> Self {
        Self {
            api,
            current: None,
            current_pid: None,
        }
    }

    /// Fetch the collection index (pid and title per collection).
    pub fn collections(&self) -> ApplicationResult<Vec<CollectionSummary>> {
        self.api
            .list()
            .map_err(|e| backend("listing collections", e))
    }

    /// Fetch and normalize a collection, replacing the current tree.
    ///
    /// The previous tree is discarded up front, so a failed load never
    /// leaves stale or half-normalized state behind.
    #[instrument(skip(self))]
    pub fn load(&mut self, pid: &str) -> ApplicationResult<&Item> {
        self.current = None;
        self.current_pid = None;

        let raw = self
            .api
            .collection(pid)
            .map_err(|e| backend(&format!("fetching collection {pid}"), e))?;
        let tree = normalize(&raw)?;
        debug!(
            "loaded {}: {} items, depth {}",
            pid,
            tree.item_count(),
            tree.depth()
        );

        self.current_pid = Some(pid.to_string());
        Ok(self.current.insert(tree))
    }

    /// The currently loaded tree, if any.
    pub fn current(&self) -> Option<&Item> {
        self.current.as_ref()
    }

    /// Pid of the currently loaded collection, if any.
    pub fn current_pid(&self) -> Option<&str> {
        self.current_pid.as_deref()
    }

    /// Locate a node in the current tree by pid.
    pub fn find(&self, pid: &str) -> Option<NodeRef<'_>> {
        self.current.as_ref().and_then(|tree| locate(tree, pid))
    }

    /// Toggle a structural node in the current tree.
    ///
    /// With no collection loaded there is nothing to match, so this is
    /// [`ToggleOutcome::NotFound`].
    pub fn toggle(&mut self, pid: &str) -> ToggleOutcome {
        match &mut self.current {
            Some(tree) => toggle(tree, pid),
            None => ToggleOutcome::NotFound,
        }
    }

    /// Close every structural node in the current tree.
    pub fn collapse_all(&mut self) {
        if let Some(tree) = &mut self.current {
            collapse_all(tree);
        }
    }

    /// Full-text search across all collections.
    pub fn search(&self, query: &str) -> ApplicationResult<SearchResults> {
        self.api
            .search(query)
            .map_err(|e| backend(&format!("searching for '{query}'"), e))
    }
}

fn backend(context: &str, source: ApiError) -> ApplicationError {
    ApplicationError::Backend {
        context: context.to_string(),
        source: Box::new(source),
    }
}
