#![forbid(unsafe_code)]

//! Error taxonomy for checklist operations.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChecklistError>;

/// Which index of a `(verification, check)` position was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexAxis {
    Verification,
    Check,
}

impl fmt::Display for IndexAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verification => f.write_str("verification"),
            Self::Check => f.write_str("check"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecklistError {
    /// Caller contract violation: indices must come from iterating the same
    /// checklist that is being updated.
    #[error("{axis} index {index} out of bounds (length {len})")]
    InvalidIndex {
        axis: IndexAxis,
        index: usize,
        len: usize,
    },

    /// `origin` is the verification source; thiserror reserves `source`.
    #[error("no check named {name:?} in source {origin:?}")]
    UnknownCheck { origin: String, name: String },

    #[error("duplicate check name {name:?} in source {origin:?}")]
    DuplicateCheckName { origin: String, name: String },

    #[error("verification at position {position} has an empty source")]
    EmptySource { position: usize },

    #[error("invalid checklist JSON: {message}")]
    Json { message: String },
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ChecklistError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: error.to_string(),
        }
    }
}
