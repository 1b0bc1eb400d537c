//! Error types for filter policy construction.

use thiserror::Error;

/// A specialized Result type for policy construction.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Contradictory or out-of-range filter options.
///
/// These are reported before the todo file is read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The cutoff window is negative.
    #[error("cutoff days must not be negative (got {0})")]
    NegativeCutoff(i64),

    /// A type letter that names no item type.
    #[error("unknown item type: {0:?} (expected one of tsacwr)")]
    UnknownType(char),

    /// The type options leave no item type to show.
    #[error("type filters exclude every item type")]
    NoTypes,
}
