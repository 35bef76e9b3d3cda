use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("reserved key cannot be used as a property predicate: {0}")]
    ReservedPredicate(String),

    #[error("invalid dateTime literal: {0}")]
    InvalidDateTime(String),

    #[error("invalid duration literal: {0}")]
    InvalidDuration(String),
}
