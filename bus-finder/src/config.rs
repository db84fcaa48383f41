//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::dataset::DatasetSource;
use crate::planner::PlannerConfig;
use crate::suggest::SuggestConfig;

const DEFAULT_DATASET: &str = "bus_routes.json";
const DEFAULT_HISTORY: &str = "search_history.json";
const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    3000,
);

/// How often to reload the dataset (24 hours).
const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the route dataset is loaded from
    pub dataset: DatasetSource,
    /// Search history file
    pub history_path: PathBuf,
    /// Listen address
    pub addr: SocketAddr,
    /// Interval between dataset reloads
    pub reload_interval: Duration,
    pub planner: PlannerConfig,
    pub suggest: SuggestConfig,
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::parse(DEFAULT_DATASET),
            history_path: PathBuf::from(DEFAULT_HISTORY),
            addr: DEFAULT_ADDR,
            reload_interval: DEFAULT_RELOAD_INTERVAL,
            planner: PlannerConfig::default(),
            suggest: SuggestConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read `BUS_FINDER_*` environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Unset or blank variables keep their defaults; unparseable ones are
    /// logged and also keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dataset) = get("BUS_FINDER_DATASET") {
            config.dataset = DatasetSource::parse(&dataset);
        }

        if let Some(path) = get("BUS_FINDER_HISTORY") {
            config.history_path = PathBuf::from(path.trim());
        }

        if let Some(addr) = get("BUS_FINDER_ADDR") {
            match addr.trim().parse() {
                Ok(addr) => config.addr = addr,
                Err(e) => warn!(value = %addr, error = %e, "invalid BUS_FINDER_ADDR, using default"),
            }
        }

        if let Some(secs) = get("BUS_FINDER_RELOAD_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.reload_interval = Duration::from_secs(secs),
                _ => warn!(value = %secs, "invalid BUS_FINDER_RELOAD_SECS, using default"),
            }
        }

        config
    }
}
