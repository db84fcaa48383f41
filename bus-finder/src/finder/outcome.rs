//! Results of a connection search.

use std::fmt;

use serde::Serialize;

use crate::domain::Route;

/// Which stage of a connection search produced the routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Direct,
    Connecting,
    NotFound,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchKind::Direct => "Direct routes",
            SearchKind::Connecting => "Connecting routes (multi-hop)",
            SearchKind::NotFound => "No routes found",
        })
    }
}

/// Routes found by a connection search, with how they were found.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub routes: Vec<Route>,
    pub kind: SearchKind,
}

impl SearchOutcome {
    pub fn not_found() -> Self {
        Self {
            routes: Vec::new(),
            kind: SearchKind::NotFound,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
