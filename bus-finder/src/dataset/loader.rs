//! Reading the bus route dataset from a file or URL.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::error::DatasetError;
use crate::domain::{Route, RouteId};

/// Request timeout for remote datasets.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level dataset document.
#[derive(Debug, Deserialize)]
struct DatasetDocument {
    #[serde(default)]
    buses: Vec<BusDto>,
}

/// One bus entry as authored in the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct BusDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub name_bn: Option<String>,
    #[serde(default)]
    pub routes: RoutesDto,
    #[serde(default)]
    pub service_type: Option<String>,
    /// Older datasets carry the service type under this key.
    #[serde(default, rename = "type")]
    pub legacy_type: Option<String>,
}

/// Stop sequences of a bus entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutesDto {
    #[serde(default)]
    pub forward: Vec<String>,
    #[serde(default)]
    pub backward: Option<Vec<String>>,
}

impl BusDto {
    /// Convert into a [`Route`], if the entry is valid.
    fn into_route(self) -> Option<Route> {
        let id = RouteId::new(self.id.clone()).ok()?;
        let route = Route::new(id, self.routes.forward).ok()?;

        Some(
            route
                .with_reverse_stops(self.routes.backward.unwrap_or_default())
                .with_names(self.name, self.name_en, self.name_bn)
                .with_service_type(self.service_type.or(self.legacy_type)),
        )
    }
}

/// Where the dataset document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// Interpret a location string: `http://` and `https://` are URLs,
    /// anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetSource::Url(location.to_string())
        } else {
            DatasetSource::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => f.write_str(url),
        }
    }
}

/// Load and convert all valid routes from `source`.
pub async fn load_dataset(source: &DatasetSource) -> Result<Vec<Route>, DatasetError> {
    let body = match source {
        DatasetSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DatasetError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        DatasetSource::Url(url) => fetch(url).await?,
    };

    let routes = parse_routes(&body)?;
    info!(source = %source, routes = routes.len(), "loaded bus routes");
    Ok(routes)
}

async fn fetch(url: &str) -> Result<String, DatasetError> {
    let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

    debug!(url, "fetching dataset");
    let response = http.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DatasetError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

/// Parse a dataset document, skipping entries that cannot form a route.
pub fn parse_routes(json: &str) -> Result<Vec<Route>, DatasetError> {
    let document: DatasetDocument =
        serde_json::from_str(json).map_err(|e| DatasetError::Json {
            message: e.to_string(),
        })?;

    let total = document.buses.len();
    let routes: Vec<Route> = document
        .buses
        .into_iter()
        .filter_map(|bus| {
            let id = bus.id.clone();
            let route = bus.into_route();
            if route.is_none() {
                warn!(id = %id, "skipping bus entry without id or forward stops");
            }
            route
        })
        .collect();

    if routes.len() < total {
        debug!(total, kept = routes.len(), "dropped invalid bus entries");
    }

    Ok(routes)
}
