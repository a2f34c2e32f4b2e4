//! Error types for shopbook-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in shopbook-core
#[derive(Debug, Error)]
pub enum Error {
    /// A registry or item operation was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Item index out of bounds
    #[error("Item index {index} out of bounds (count: {len})")]
    ItemOutOfBounds { index: usize, len: usize },

    /// Custom column not declared on the order
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Unrecognised column type name
    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),

    /// Unrecognised order status name
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
}

/// User-facing validation failures. The order is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Column name empty after trimming
    #[error("Column name cannot be empty.")]
    EmptyColumnName,

    /// Column name already declared (case-insensitive)
    #[error("A column with the name '{0}' already exists.")]
    DuplicateColumnName(String),

    /// Attempt to remove the only remaining line item
    #[error("An order must have at least one item.")]
    LastItem,
}

impl Error {
    /// Get the validation error if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }
}
