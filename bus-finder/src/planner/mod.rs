//! Route matching and journey planning.
//!
//! This module answers: "which bus routes take me from this stop to that
//! one?" It checks single routes first, then pairs of routes that share a
//! stop, then a bounded search with up to two transfers.
//!
//! The searches are heuristic. They return the first connections found,
//! capped by [`PlannerConfig`], not a shortest path.

mod config;
mod connectivity;
mod search;

#[cfg(test)]
mod search_tests;

pub use config::PlannerConfig;
pub use connectivity::can_travel;
pub use search::Planner;
