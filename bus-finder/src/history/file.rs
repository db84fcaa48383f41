//! JSON-file history store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::warn;

use super::entries::Entries;
use super::{HistoryError, HistoryStore, SearchHistoryEntry};

/// History persisted as a pretty-printed JSON file.
///
/// The file is read once on open and rewritten after every change.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl JsonFileHistoryStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts an empty history. An unreadable or corrupt
    /// one is logged and also starts empty; it is overwritten on the
    /// next change.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable history file");
                Entries::default()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn read(path: &Path) -> Result<Entries, HistoryError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::default()),
            Err(e) => {
                return Err(HistoryError::Io {
                    message: e.to_string(),
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| HistoryError::Json {
            message: e.to_string(),
        })
    }

    fn write(&self, entries: &Entries) -> Result<(), HistoryError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| HistoryError::Io {
                message: format!("failed to create history directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| HistoryError::Json {
            message: format!("failed to serialize history: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| HistoryError::Io {
            message: format!("failed to write history file: {}", e),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `change` and persist the result.
    fn modify<T>(
        &self,
        change: impl FnOnce(&mut Entries) -> Result<T, HistoryError>,
    ) -> Result<T, HistoryError> {
        let mut entries = self.lock();
        let out = change(&mut entries)?;
        self.write(&entries)?;
        Ok(out)
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn recent(&self, limit: usize) -> Result<Vec<SearchHistoryEntry>, HistoryError> {
        Ok(self.lock().recent(limit))
    }

    fn insert(
        &self,
        from: &str,
        to: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<SearchHistoryEntry, HistoryError> {
        self.modify(|entries| Ok(entries.insert(from, to, timestamp)))
    }

    fn record(
        &self,
        from: &str,
        to: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<SearchHistoryEntry, HistoryError> {
        self.modify(|entries| Ok(entries.record(from, to, timestamp)))
    }

    fn update_timestamp(&self, id: u64, timestamp: DateTime<Utc>) -> Result<(), HistoryError> {
        self.modify(|entries| entries.update_timestamp(id, timestamp))
    }

    fn delete(&self, id: u64) -> Result<(), HistoryError> {
        self.modify(|entries| entries.delete(id))
    }

    fn clear_all(&self) -> Result<(), HistoryError> {
        self.modify(|entries| {
            entries.clear();
            Ok(())
        })
    }
}
