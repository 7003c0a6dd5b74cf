//! Error module for Expando.
//!
//! This module provides the error handling framework for the whole crate:
//! one `thiserror` enum per concern, a root [`ExpandoError`] that every
//! component error converts into, and a small reporting layer used by the
//! command line front end to surface fatal failures with context.
//!
//! Per-entry problems in a mapping are *not* errors; they are reported as
//! [`crate::mapping::Diagnostic`] values and compilation continues.

use std::fmt::{Display, Formatter};
use thiserror::Error;

pub mod config;
pub mod mapping;

pub use crate::emit::EmitError;
pub use crate::trie::TrieError;

/// Result type alias used throughout Expando.
pub type ExpandoResult<T> = Result<T, ExpandoError>;

/// Core error enum for Expando.
#[derive(Error, Debug)]
pub enum ExpandoError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors occurring while reading a mapping document.
    #[error("Mapping error: {0}")]
    Mapping(#[from] mapping::MappingError),

    /// Fatal errors raised while compiling the trie tables.
    #[error("Trie compilation error: {0}")]
    Trie(#[from] TrieError),

    /// Errors raised while rendering a compiled bundle.
    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors serializing configuration or output documents.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: ExpandoError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<S: Into<String>>(error: ExpandoError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    ///
    /// # Arguments
    ///
    /// * `details` - Additional context information to help with debugging
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    ///
    /// # Arguments
    ///
    /// * `context` - The error context to report
    fn report(&self, context: ErrorContext);
}

/// Reporter that logs errors using the tracing framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}
