//! Stop name handling.
//!
//! The dataset has no stable stop ids, so stop identity is inferred at
//! comparison time by normalizing free-text labels.

mod matcher;
mod names;
mod normalize;

pub use matcher::{find_normalized_index, find_stop_index, locate};
pub use names::StopNames;
pub use normalize::{clean_label, normalize};
