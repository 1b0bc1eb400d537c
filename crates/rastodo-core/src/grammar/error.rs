//! Error types for the line parser.

use thiserror::Error;

use crate::date::DateError;
use crate::record::TaskKind;

/// A specialized Result type for line parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Reasons a content line could not be turned into a [`TaskRecord`].
///
/// These are recoverable: the file parser reports them per line and moves on.
///
/// [`TaskRecord`]: crate::record::TaskRecord
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line is empty.
    #[error("empty line")]
    Empty,

    /// The first character is not a known item type.
    #[error("unknown item type: {first:?}")]
    Unrecognized {
        /// The offending first character.
        first: char,
    },

    /// The line starts with a known type letter but does not follow its format.
    #[error("line does not match the '{kind}' item format")]
    Malformed {
        /// The kind selected by the first character.
        kind: TaskKind,
    },

    /// The date token is not a real calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(#[from] DateError),

    /// A recurrence unit that has no fixed length (`m`, `y`).
    #[error("unsupported recurrence unit: {unit:?} (only d and w are supported)")]
    UnsupportedUnit {
        /// The unit letter.
        unit: char,
    },

    /// A priority or interval too large to represent.
    #[error("number out of range: {value}")]
    NumberOutOfRange {
        /// The digits as written.
        value: String,
    },

    /// The next occurrence falls outside the supported calendar.
    #[error("next occurrence is out of range")]
    DateOverflow,
}

impl ParseError {
    /// Creates a number out of range error.
    pub fn number_out_of_range(value: impl Into<String>) -> Self {
        ParseError::NumberOutOfRange {
            value: value.into(),
        }
    }
}
