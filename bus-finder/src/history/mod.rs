//! Recent searches.
//!
//! A short, most-recent-first list of (from, to) pairs the user searched
//! for. Repeating a search bumps its timestamp instead of adding a
//! duplicate.

mod entries;
mod error;
mod file;
mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::HistoryError;
pub use file::JsonFileHistoryStore;
pub use memory::MemoryHistoryStore;

/// Number of searches kept.
pub const MAX_HISTORY: usize = 10;

/// One remembered search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: u64,
    pub from_location: String,
    pub to_location: String,
    pub timestamp: DateTime<Utc>,
}

impl SearchHistoryEntry {
    /// Case-insensitive comparison of the searched pair.
    pub fn is_same_search(&self, from: &str, to: &str) -> bool {
        self.from_location.to_lowercase() == from.to_lowercase()
            && self.to_location.to_lowercase() == to.to_lowercase()
    }
}

/// Persistence for search history.
pub trait HistoryStore: Send + Sync {
    /// Up to `limit` entries, most recent first.
    fn recent(&self, limit: usize) -> Result<Vec<SearchHistoryEntry>, HistoryError>;

    /// Add an entry and return it with its assigned id.
    fn insert(
        &self,
        from: &str,
        to: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<SearchHistoryEntry, HistoryError>;

    /// Remember a search in one step: bump the timestamp of an entry for
    /// the same pair (ignoring case), or insert it and drop entries
    /// beyond the [`MAX_HISTORY`] most recent.
    fn record(
        &self,
        from: &str,
        to: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<SearchHistoryEntry, HistoryError>;

    fn update_timestamp(&self, id: u64, timestamp: DateTime<Utc>) -> Result<(), HistoryError>;

    fn delete(&self, id: u64) -> Result<(), HistoryError>;

    fn clear_all(&self) -> Result<(), HistoryError>;
}

/// Remember a search at `now`.
///
/// An existing entry for the same pair (ignoring case) only has its
/// timestamp bumped. Otherwise the trimmed pair is inserted and entries
/// beyond the [`MAX_HISTORY`] most recent are removed.
pub fn save_search(
    store: &dyn HistoryStore,
    from: &str,
    to: &str,
    now: DateTime<Utc>,
) -> Result<(), HistoryError> {
    let entry = store.record(from.trim(), to.trim(), now)?;
    debug!(id = entry.id, from = %entry.from_location, to = %entry.to_location, "saved search");
    Ok(())
}
