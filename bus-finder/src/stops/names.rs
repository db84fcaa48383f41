//! The universe of known stop names.

use std::collections::BTreeSet;

use crate::domain::Route;

use super::normalize::clean_label;

/// Every distinct stop label across all routes, both directions.
///
/// Labels are cleaned for display, deduplicated and sorted. This is the
/// candidate list for autocomplete; it carries no route membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopNames {
    names: Vec<String>,
}

impl StopNames {
    /// Collect stop names from the forward and backward sequences of `routes`.
    pub fn from_routes(routes: &[Route]) -> Self {
        let names: BTreeSet<String> = routes
            .iter()
            .flat_map(Route::all_stops)
            .filter(|stop| !stop.trim().is_empty())
            .map(|stop| clean_label(stop))
            .collect();

        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
