//! In-memory history store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::entries::Entries;
use super::{HistoryError, HistoryStore, SearchHistoryEntry};

/// History kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Entries>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn recent(&self, limit: usize) -> Result<Vec<SearchHistoryEntry>, HistoryError> {
        Ok(self.lock().recent(limit))
    }

    fn insert(
        &self,
        from: &str,
        to: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<SearchHistoryEntry, HistoryError> {
        Ok(self.lock().insert(from, to, timestamp))
    }

    fn record(
        &self,
        from: &str,
        to: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<SearchHistoryEntry, HistoryError> {
        Ok(self.lock().record(from, to, timestamp))
    }

    fn update_timestamp(&self, id: u64, timestamp: DateTime<Utc>) -> Result<(), HistoryError> {
        self.lock().update_timestamp(id, timestamp)
    }

    fn delete(&self, id: u64) -> Result<(), HistoryError> {
        self.lock().delete(id)
    }

    fn clear_all(&self) -> Result<(), HistoryError> {
        self.lock().clear();
        Ok(())
    }
}
