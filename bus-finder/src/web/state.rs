//! Application state for the web layer.

use std::sync::Arc;

use crate::finder::BusFinder;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route search service
    pub finder: Arc<BusFinder>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(finder: BusFinder) -> Self {
        Self {
            finder: Arc::new(finder),
        }
    }

    /// Share an existing finder, e.g. with a background reload task.
    pub fn from_shared(finder: Arc<BusFinder>) -> Self {
        Self { finder }
    }
}
