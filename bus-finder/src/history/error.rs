//! Search history error types.

/// Errors that can occur when reading or writing search history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Reading or writing the history file failed
    #[error("history I/O error: {message}")]
    Io { message: String },

    /// History file could not be (de)serialized
    #[error("history JSON error: {message}")]
    Json { message: String },

    /// No entry with the given id
    #[error("no history entry with id {0}")]
    NotFound(u64),
}
