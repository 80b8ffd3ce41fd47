//! Error types for corpus generation

use thiserror::Error;

/// Error type for corpus generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] tabular_core::Error),

    /// No factory is registered under the requested identifier
    #[error("Unsupported dataset: {0}")]
    UnsupportedDataset(String),
}

/// Result type for corpus generation
pub type Result<T> = std::result::Result<T, Error>;
