//! Error types for tabular data operations

use thiserror::Error;

/// Result type for tabular data operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tabular data operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Integer row access outside the store
    #[error("Index {index} out of range for {len} rows")]
    IndexOutOfRange {
        /// Requested position (may be negative)
        index: isize,
        /// Number of rows in the store
        len: usize,
    },

    /// Projection, selection or sort on a column that does not exist
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Sequences that must share a length do not
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Value type not supported by the operation
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}
