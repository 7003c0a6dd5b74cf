//! Error types for bundle emission.

use thiserror::Error;

/// Errors that can occur while rendering a compiled bundle.
#[derive(Error, Debug)]
pub enum EmitError {
    /// C character literals can only carry ASCII hash keys.
    #[error("Hash entry {entry} has non-ASCII key {key:?}, which cannot be emitted as a C char")]
    NonAsciiKey {
        /// Index of the offending hash entry
        entry: usize,
        /// The key character
        key: char,
    },

    /// Writing to the output buffer failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// The bundle could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for bundle emission.
pub type EmitResult<T> = Result<T, EmitError>;
