//! The bus-finder application service.
//!
//! Ties the dataset, planner, autocomplete and search history together
//! behind the operations a presentation layer calls.

mod fields;
mod outcome;
mod service;

pub use outcome::{SearchKind, SearchOutcome};
pub use service::BusFinder;
