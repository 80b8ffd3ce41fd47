//! Error types for the question-answering stand-ins

use thiserror::Error;

/// Error type for the question-answering stand-ins
#[derive(Error, Debug)]
pub enum Error {
    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] tabular_core::Error),

    /// Malformed training configuration
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A pipeline was requested for a task other than question answering
    #[error("Unsupported task: {0}")]
    UnsupportedTask(String),

    /// A row lacks a text field the pipeline needs
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for the question-answering stand-ins
pub type Result<T> = std::result::Result<T, Error>;
