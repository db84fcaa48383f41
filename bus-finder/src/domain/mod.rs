//! Domain types for the bus finder.
//!
//! Routes enforce their invariants at construction time, so the planner
//! can trust every route it is handed. Journey plans are transient,
//! request-scoped values.

mod error;
mod journey;
mod route;

pub use error::DomainError;
pub use journey::{Direction, JourneyPlan, JourneySegment};
pub use route::{Route, RouteId};
