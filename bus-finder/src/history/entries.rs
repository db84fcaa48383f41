//! Entry list shared by the history stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HistoryError, MAX_HISTORY, SearchHistoryEntry};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(super) struct Entries {
    next_id: u64,
    entries: Vec<SearchHistoryEntry>,
}

impl Entries {
    pub fn recent(&self, limit: usize) -> Vec<SearchHistoryEntry> {
        let mut sorted = self.entries.clone();
        // Newest first; equal timestamps fall back to insertion order
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        sorted.truncate(limit);
        sorted
    }

    pub fn insert(&mut self, from: &str, to: &str, timestamp: DateTime<Utc>) -> SearchHistoryEntry {
        self.next_id += 1;
        let entry = SearchHistoryEntry {
            id: self.next_id,
            from_location: from.to_string(),
            to_location: to.to_string(),
            timestamp,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Bump an existing (from, to) entry or insert a new one, then drop
    /// everything beyond the [`MAX_HISTORY`] most recent.
    pub fn record(
        &mut self,
        from: &str,
        to: &str,
        timestamp: DateTime<Utc>,
    ) -> SearchHistoryEntry {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.is_same_search(from, to))
        {
            entry.timestamp = timestamp;
            return entry.clone();
        }

        let entry = self.insert(from, to, timestamp);
        let keep: Vec<u64> = self.recent(MAX_HISTORY).iter().map(|e| e.id).collect();
        self.entries.retain(|e| keep.contains(&e.id));
        entry
    }

    pub fn update_timestamp(
        &mut self,
        id: u64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), HistoryError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(HistoryError::NotFound(id))?;
        entry.timestamp = timestamp;
        Ok(())
    }

    pub fn delete(&mut self, id: u64) -> Result<(), HistoryError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(HistoryError::NotFound(id));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
