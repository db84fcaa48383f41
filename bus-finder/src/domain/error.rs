//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from dataset and history I/O errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Route violates a construction invariant
    #[error("invalid route: {0}")]
    InvalidRoute(&'static str),

    /// Journey plan has no segments
    #[error("journey plan must have at least one segment")]
    EmptyJourney,

    /// Consecutive segments don't share a transfer stop
    #[error("segments do not connect: {0} and {1}")]
    SegmentsNotConnected(String, String),
}
