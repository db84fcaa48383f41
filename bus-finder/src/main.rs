use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bus_finder::config::AppConfig;
use bus_finder::dataset::RouteDataset;
use bus_finder::finder::BusFinder;
use bus_finder::history::JsonFileHistoryStore;
use bus_finder::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();

    info!(source = %config.dataset, "loading bus routes");
    let dataset = Arc::new(RouteDataset::load(config.dataset.clone()).await);
    let snapshot = dataset.snapshot().await;
    if snapshot.is_empty() {
        warn!("no bus routes loaded; searches will return nothing until a reload succeeds");
    } else {
        info!(
            routes = snapshot.routes().len(),
            stops = snapshot.stop_names().len(),
            "bus routes loaded"
        );
    }
    drop(snapshot);

    let history_path = config.history_path.clone();
    let opened =
        tokio::task::spawn_blocking(move || JsonFileHistoryStore::open(&history_path)).await;
    let history = match opened {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(
                path = %config.history_path.display(),
                error = %e,
                "failed to open search history"
            );
            std::process::exit(1);
        }
    };
    let finder = Arc::new(
        BusFinder::new(dataset, history)
            .with_planner_config(config.planner.clone())
            .with_suggest_config(config.suggest.clone())
            .with_cache_config(&config.cache),
    );

    // Spawn background task to reload the dataset
    let reloader = Arc::clone(&finder);
    let reload_interval = config.reload_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(reload_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match reloader.reload_dataset().await {
                Ok(count) => info!(routes = count, "reloaded bus routes"),
                Err(e) => warn!(error = %e, "failed to reload bus routes, keeping previous"),
            }
        }
    });

    let app = create_router(AppState::from_shared(finder));

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(addr = %config.addr, "bus finder listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
