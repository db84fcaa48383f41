//! Web layer for the bus finder.
//!
//! JSON endpoints for stop suggestions, route search, journey plans and
//! search history.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
