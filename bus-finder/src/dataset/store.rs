//! Shared, replaceable snapshot of the loaded routes.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::error::DatasetError;
use super::loader::{DatasetSource, load_dataset};
use crate::domain::Route;
use crate::stops::StopNames;

/// An immutable set of routes with its derived stop-name universe.
#[derive(Debug, Default)]
pub struct Dataset {
    routes: Vec<Route>,
    stop_names: StopNames,
    generation: u64,
}

impl Dataset {
    pub fn new(routes: Vec<Route>) -> Self {
        let stop_names = StopNames::from_routes(&routes);
        Self {
            routes,
            stop_names,
            generation: 0,
        }
    }

    /// Routes in dataset order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn stop_names(&self) -> &StopNames {
        &self.stop_names
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of replacements before this snapshot; 0 for the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The current dataset, shared between readers.
///
/// Readers clone the `Arc` and work on a snapshot; a replacement never
/// mutates a snapshot in place.
#[derive(Debug)]
pub struct RouteDataset {
    source: Option<DatasetSource>,
    current: RwLock<Arc<Dataset>>,
}

impl RouteDataset {
    /// A dataset with fixed contents and nothing to reload from.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self {
            source: None,
            current: RwLock::new(Arc::new(Dataset::new(routes))),
        }
    }

    /// Load from `source`; a failed initial load yields an empty dataset.
    pub async fn load(source: DatasetSource) -> Self {
        let dataset = match load_dataset(&source).await {
            Ok(routes) => Dataset::new(routes),
            Err(e) => {
                warn!(source = %source, error = %e, "initial dataset load failed, starting empty");
                Dataset::default()
            }
        };

        Self {
            source: Some(source),
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<Dataset> {
        self.current.read().await.clone()
    }

    /// Swap in a new set of routes under the next generation.
    pub async fn replace(&self, routes: Vec<Route>) {
        let dataset = Dataset::new(routes);
        let mut current = self.current.write().await;
        *current = Arc::new(Dataset {
            generation: current.generation + 1,
            ..dataset
        });
    }

    /// Re-read the source. On failure the previous snapshot stays.
    ///
    /// Returns the number of routes now loaded.
    pub async fn reload(&self) -> Result<usize, DatasetError> {
        let Some(source) = &self.source else {
            return Ok(self.snapshot().await.routes().len());
        };

        let routes = load_dataset(source).await?;
        let count = routes.len();
        self.replace(routes).await;
        info!(source = %source, routes = count, "dataset reloaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn route(id: &str, stops: &[&str]) -> Route {
        Route::new(
            RouteId::new(id).unwrap(),
            stops.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    fn document(ids: &[&str]) -> String {
        let buses: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(r#"{{ "id": "{id}", "routes": {{ "forward": ["Gulistan", "Farmgate"] }} }}"#)
            })
            .collect();
        format!(r#"{{ "buses": [{}] }}"#, buses.join(","))
    }

    #[test]
    fn dataset_derives_stop_names() {
        let dataset = Dataset::new(vec![
            route("R1", &["Gulistan", "Farmgate"]),
            route("R2", &["Farmgate", "Mohakhali"]),
        ]);
        assert_eq!(
            dataset.stop_names().as_slice(),
            ["Farmgate", "Gulistan", "Mohakhali"]
        );
    }

    #[tokio::test]
    async fn replace_swaps_whole_snapshot() {
        let store = RouteDataset::from_routes(vec![route("R1", &["A", "B"])]);
        let before = store.snapshot().await;

        store.replace(vec![route("R2", &["C", "D"])]).await;
        let after = store.snapshot().await;

        // Old readers keep their snapshot
        assert_eq!(before.routes()[0].id().as_str(), "R1");
        assert_eq!(after.routes()[0].id().as_str(), "R2");
        assert_eq!(after.stop_names().as_slice(), ["C", "D"]);
    }

    #[tokio::test]
    async fn each_replace_advances_generation() {
        let store = RouteDataset::from_routes(vec![route("R1", &["A", "B"])]);
        assert_eq!(store.snapshot().await.generation(), 0);

        store.replace(vec![route("R2", &["C", "D"])]).await;
        store.replace(vec![route("R3", &["E", "F"])]).await;
        assert_eq!(store.snapshot().await.generation(), 2);
    }

    #[tokio::test]
    async fn failed_initial_load_is_empty() {
        let store =
            RouteDataset::load(DatasetSource::File(PathBuf::from("/nonexistent/routes.json")))
                .await;
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn reload_picks_up_changes_and_keeps_old_on_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bus_routes.json");
        std::fs::write(&path, document(&["1"])).unwrap();

        let store = RouteDataset::load(DatasetSource::File(path.clone())).await;
        assert_eq!(store.snapshot().await.routes().len(), 1);

        std::fs::write(&path, document(&["1", "2"])).unwrap();
        assert_eq!(store.reload().await.unwrap(), 2);

        std::fs::write(&path, "{ broken").unwrap();
        assert!(store.reload().await.is_err());
        assert_eq!(store.snapshot().await.routes().len(), 2);
    }
}
