//! Bus route finder for Dhaka.
//!
//! Answers "which bus gets me from here to there?" over a static dataset
//! of bus routes: direct routes, routes with transfers, journey plans and
//! stop-name autocomplete, served as a JSON API.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod finder;
pub mod history;
pub mod planner;
pub mod stops;
pub mod suggest;
pub mod web;
