//! Mapping document error module.
//!
//! Errors raised while locating and parsing the document that lists the
//! trigger to payload pairs. Problems with individual entries are not errors;
//! see [`crate::mapping::Diagnostic`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a mapping document.
#[derive(Error, Debug)]
pub enum MappingError {
    /// The mapping document does not exist.
    #[error("Mapping file not found: {0}")]
    FileNotFound(PathBuf),

    /// The mapping document could not be read.
    #[error("Failed to read mapping file {path}: {source}")]
    Read {
        /// Path of the document
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported mapping format for: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// The TOML document is malformed.
    #[error("Invalid TOML mapping: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON document is malformed.
    #[error("Invalid JSON mapping: {0}")]
    Json(#[from] serde_json::Error),
}
