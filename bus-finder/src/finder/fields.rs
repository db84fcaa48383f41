//! Debounced from/to query fields.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::trace;

use crate::dataset::RouteDataset;
use crate::suggest::{Debouncer, suggest};

/// One search input: what has been typed and the suggestions for it.
#[derive(Debug)]
pub(super) struct QueryField {
    name: &'static str,
    query: watch::Sender<String>,
    suggestions: Arc<watch::Sender<Vec<String>>>,
    debouncer: Debouncer,
}

impl QueryField {
    pub fn new(name: &'static str, debounce: Duration) -> Self {
        Self {
            name,
            query: watch::Sender::new(String::new()),
            suggestions: Arc::new(watch::Sender::new(Vec::new())),
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Record a new query and re-arm the suggestion timer.
    pub fn update(&self, query: &str, dataset: &Arc<RouteDataset>, limit: usize) {
        self.query.send_replace(query.to_string());

        if query.trim().is_empty() {
            self.clear_suggestions();
            return;
        }

        let dataset = Arc::clone(dataset);
        let suggestions = Arc::clone(&self.suggestions);
        let query = query.to_string();
        let name = self.name;

        self.debouncer.schedule(async move {
            let snapshot = dataset.snapshot().await;
            let found = suggest(&query, snapshot.stop_names().as_slice(), limit);
            trace!(field = name, query = %query, found = found.len(), "suggestions");
            suggestions.send_replace(found);
        });
    }

    /// Cancel pending suggestions and clear the published ones.
    pub fn clear_suggestions(&self) {
        self.debouncer.cancel();
        self.suggestions.send_replace(Vec::new());
    }

    /// Reset the typed query and its suggestions.
    pub fn clear(&self) {
        self.query.send_replace(String::new());
        self.clear_suggestions();
    }

    pub fn query(&self) -> watch::Receiver<String> {
        self.query.subscribe()
    }

    pub fn suggestions(&self) -> watch::Receiver<Vec<String>> {
        self.suggestions.subscribe()
    }
}
