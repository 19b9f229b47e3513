//! Error types for the archive engine
//!
//! Defines engine-specific error types using thiserror for clear error
//! propagation. Recoverable negative results (a module that already
//! exists, a path segment that is missing) are expressed in return types,
//! not as errors.

use thiserror::Error;

/// Main error type for the archive engine
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio decoding errors
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Artifact encoding errors
    #[error("Artifact encode error: {0}")]
    Encode(String),

    /// Merge pipeline errors
    #[error("Merge error: {0}")]
    Merge(String),

    /// Audio capture service errors
    #[error("Capture error: {0}")]
    Capture(String),

    /// Invalid state for operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convenience Result type using the engine Error
pub type Result<T> = std::result::Result<T, Error>;
