//! Stop-name autocomplete.
//!
//! Ranks the flat universe of stop names against what the user has typed
//! so far. Ranking knows nothing about routes. Recomputation on each
//! keystroke is debounced per input field.

mod config;
mod debounce;
mod rank;

pub use config::SuggestConfig;
pub use debounce::Debouncer;
pub use rank::{EXACT_MATCH_SCORE, score, suggest};
