//! The [`BusFinder`] façade.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::fields::QueryField;
use super::outcome::{SearchKind, SearchOutcome};
use crate::cache::{CacheConfig, SearchCache};
use crate::dataset::{DatasetError, RouteDataset};
use crate::domain::{JourneyPlan, Route};
use crate::history::{HistoryStore, MAX_HISTORY, SearchHistoryEntry, save_search};
use crate::planner::{Planner, PlannerConfig};
use crate::suggest::{SuggestConfig, suggest};

/// Bus route search for a presentation layer.
///
/// Every query runs against the dataset snapshot current when it starts.
/// Search operations are total: blank input, an empty dataset or a
/// failing history store all give empty results rather than errors.
pub struct BusFinder {
    dataset: Arc<RouteDataset>,
    history: Arc<dyn HistoryStore>,
    planner: PlannerConfig,
    suggest: SuggestConfig,
    cache: SearchCache,
    loading: watch::Sender<bool>,
    in_flight: AtomicUsize,
    from: QueryField,
    to: QueryField,
}

/// Marks a search as in flight until dropped.
struct Loading<'a>(&'a BusFinder);

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        if self.0.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.loading.send_replace(false);
        }
    }
}

fn is_blank_pair(from: &str, to: &str) -> bool {
    from.trim().is_empty() || to.trim().is_empty()
}

fn owned(routes: Vec<&Route>) -> Vec<Route> {
    routes.into_iter().cloned().collect()
}

impl BusFinder {
    /// Create a finder with default planner, suggestion and cache settings.
    pub fn new(dataset: Arc<RouteDataset>, history: Arc<dyn HistoryStore>) -> Self {
        let suggest = SuggestConfig::default();
        Self {
            dataset,
            history,
            planner: PlannerConfig::default(),
            from: QueryField::new("from", suggest.debounce),
            to: QueryField::new("to", suggest.debounce),
            suggest,
            cache: SearchCache::new(&CacheConfig::default()),
            loading: watch::Sender::new(false),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_planner_config(mut self, config: PlannerConfig) -> Self {
        self.planner = config;
        self
    }

    pub fn with_suggest_config(mut self, config: SuggestConfig) -> Self {
        self.from = QueryField::new("from", config.debounce);
        self.to = QueryField::new("to", config.debounce);
        self.suggest = config;
        self
    }

    pub fn with_cache_config(mut self, config: &CacheConfig) -> Self {
        self.cache = SearchCache::new(config);
        self
    }

    fn begin_loading(&self) -> Loading<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.loading.send_replace(true);
        Loading(self)
    }

    /// Record a search in the background. Failures are only logged.
    fn remember(&self, from: &str, to: &str) {
        let history = Arc::clone(&self.history);
        let from = from.to_string();
        let to = to.to_string();

        tokio::task::spawn_blocking(move || {
            if let Err(e) = save_search(history.as_ref(), &from, &to, Utc::now()) {
                warn!(from = %from, to = %to, error = %e, "failed to save search");
            }
        });
    }

    /// Routes that directly serve `from` then `to`, in dataset order.
    pub async fn search_buses(&self, from: &str, to: &str) -> Vec<Route> {
        if is_blank_pair(from, to) {
            return Vec::new();
        }

        let _loading = self.begin_loading();
        let snapshot = self.dataset.snapshot().await;
        let routes = owned(Planner::new(snapshot.routes(), &self.planner).search_direct(from, to));

        info!(from, to, found = routes.len(), "direct search");
        if !routes.is_empty() {
            self.remember(from, to);
        }
        routes
    }

    /// Direct routes if any, else routes of a multi-hop connection.
    pub async fn search_buses_with_connections(&self, from: &str, to: &str) -> SearchOutcome {
        if is_blank_pair(from, to) {
            return SearchOutcome::not_found();
        }

        let snapshot = self.dataset.snapshot().await;
        let key = SearchCache::key(snapshot.generation(), from, to);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(from, to, "connection search cache hit");
            if !hit.is_empty() {
                self.remember(from, to);
            }
            return hit.as_ref().clone();
        }

        let _loading = self.begin_loading();
        let planner = Planner::new(snapshot.routes(), &self.planner);

        let outcome = match planner.search_direct(from, to) {
            direct if !direct.is_empty() => SearchOutcome {
                routes: owned(direct),
                kind: SearchKind::Direct,
            },
            _ => match planner.find_multi_hop_journey(from, to) {
                multi if !multi.is_empty() => SearchOutcome {
                    routes: owned(multi),
                    kind: SearchKind::Connecting,
                },
                _ => SearchOutcome::not_found(),
            },
        };

        info!(from, to, kind = %outcome.kind, found = outcome.routes.len(), "connection search");
        if !outcome.is_empty() {
            self.remember(from, to);
        }

        self.cache.insert(key, Arc::new(outcome.clone())).await;
        outcome
    }

    /// Routes taking part in a one-transfer (or hub) connection.
    pub async fn search_with_transfers(&self, from: &str, to: &str) -> Vec<Route> {
        if is_blank_pair(from, to) {
            return Vec::new();
        }

        let _loading = self.begin_loading();
        let snapshot = self.dataset.snapshot().await;
        let routes =
            owned(Planner::new(snapshot.routes(), &self.planner).search_with_transfers(from, to));

        info!(from, to, found = routes.len(), "transfer search");
        if !routes.is_empty() {
            self.remember(from, to);
        }
        routes
    }

    /// A segment-by-segment plan for the trip, if one can be built.
    pub async fn create_journey_plan(&self, from: &str, to: &str) -> Option<JourneyPlan> {
        if is_blank_pair(from, to) {
            return None;
        }

        let snapshot = self.dataset.snapshot().await;
        Planner::new(snapshot.routes(), &self.planner).create_journey_plan(from, to)
    }

    pub async fn get_bus_route(&self, id: &str) -> Option<Route> {
        let snapshot = self.dataset.snapshot().await;
        snapshot.routes().iter().find(|r| r.id().as_str() == id).cloned()
    }

    /// Distinct service types, sorted.
    pub async fn get_service_types(&self) -> Vec<String> {
        let snapshot = self.dataset.snapshot().await;
        Planner::new(snapshot.routes(), &self.planner).service_types()
    }

    /// Routes with a stop whose name contains `stop_name`.
    pub async fn get_buses_at_stop(&self, stop_name: &str) -> Vec<Route> {
        let snapshot = self.dataset.snapshot().await;
        owned(Planner::new(snapshot.routes(), &self.planner).buses_at_stop(stop_name))
    }

    pub async fn all_routes(&self) -> Vec<Route> {
        self.dataset.snapshot().await.routes().to_vec()
    }

    /// The sorted, deduplicated stop-name universe.
    pub async fn stop_names(&self) -> Vec<String> {
        self.dataset.snapshot().await.stop_names().as_slice().to_vec()
    }

    /// Rank stop names against `query` right away, without debouncing.
    pub async fn suggest_stops(&self, query: &str, limit: usize) -> Vec<String> {
        let snapshot = self.dataset.snapshot().await;
        suggest(query, snapshot.stop_names().as_slice(), limit)
    }

    /// The configured number of suggestions per field.
    pub fn suggest_limit(&self) -> usize {
        self.suggest.limit
    }

    /// Swap in new routes and drop cached outcomes.
    pub async fn replace_routes(&self, routes: Vec<Route>) {
        self.dataset.replace(routes).await;
        self.cache.invalidate_all();
    }

    /// Re-read the dataset source. On failure the current routes stay.
    pub async fn reload_dataset(&self) -> Result<usize, DatasetError> {
        let count = self.dataset.reload().await?;
        self.cache.invalidate_all();
        Ok(count)
    }

    /// Whether any search is in flight.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Record what was typed into the "from" field.
    ///
    /// Suggestions follow after the debounce delay. A non-empty query
    /// clears the "to" field's suggestions.
    pub fn update_from_query(&self, query: &str) {
        if !query.is_empty() {
            self.to.clear_suggestions();
        }
        self.from.update(query, &self.dataset, self.suggest.limit);
    }

    /// Record what was typed into the "to" field.
    ///
    /// Suggestions follow after the debounce delay. A non-empty query
    /// clears the "from" field's suggestions.
    pub fn update_to_query(&self, query: &str) {
        if !query.is_empty() {
            self.from.clear_suggestions();
        }
        self.to.update(query, &self.dataset, self.suggest.limit);
    }

    /// Reset both fields and their suggestions.
    pub fn clear_searches(&self) {
        self.from.clear();
        self.to.clear();
    }

    pub fn from_query(&self) -> watch::Receiver<String> {
        self.from.query()
    }

    pub fn to_query(&self) -> watch::Receiver<String> {
        self.to.query()
    }

    pub fn from_suggestions(&self) -> watch::Receiver<Vec<String>> {
        self.from.suggestions()
    }

    pub fn to_suggestions(&self) -> watch::Receiver<Vec<String>> {
        self.to.suggestions()
    }

    /// The most recent searches, newest first.
    pub async fn recent_searches(&self) -> Vec<SearchHistoryEntry> {
        let history = Arc::clone(&self.history);
        let result = tokio::task::spawn_blocking(move || history.recent(MAX_HISTORY)).await;

        match result {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => {
                warn!(error = %e, "failed to read search history");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "search history task failed");
                Vec::new()
            }
        }
    }

    /// Delete one remembered search. Returns false if it could not be removed.
    pub async fn delete_search(&self, id: u64) -> bool {
        let history = Arc::clone(&self.history);
        self.run_history("delete search", move || history.delete(id))
            .await
    }

    /// Forget all remembered searches.
    pub async fn clear_search_history(&self) -> bool {
        let history = Arc::clone(&self.history);
        self.run_history("clear search history", move || history.clear_all())
            .await
    }

    async fn run_history<F>(&self, action: &'static str, op: F) -> bool
    where
        F: FnOnce() -> Result<(), crate::history::HistoryError> + Send + 'static,
    {
        match tokio::task::spawn_blocking(op).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(action, error = %e, "search history update failed");
                false
            }
            Err(e) => {
                warn!(action, error = %e, "search history task failed");
                false
            }
        }
    }
}
