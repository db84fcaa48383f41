//! Bus route dataset.
//!
//! The dataset is loaded once from a JSON document (file or URL) and
//! replaced wholesale on reload. Everything downstream reads immutable
//! snapshots.

mod error;
mod loader;
mod store;

pub use error::DatasetError;
pub use loader::{BusDto, DatasetSource, RoutesDto, load_dataset, parse_routes};
pub use store::{Dataset, RouteDataset};
