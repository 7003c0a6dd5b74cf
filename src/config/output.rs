//! Output configuration module.
//!
//! Controls how a compiled bundle is rendered.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Symbol prefix matching the firmware runtime's expectations.
pub const DEFAULT_SYMBOL_PREFIX: &str = "zmk_text_expander";

/// Rendering of a compiled bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// C translation unit plus an optional header
    C,
    /// Pretty-printed JSON document
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when the command line does not choose one
    pub format: OutputFormat,

    /// Prefix of every generated C symbol
    pub symbol_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::C,
            symbol_prefix: DEFAULT_SYMBOL_PREFIX.to_string(),
        }
    }
}

impl Validate for OutputConfig {
    fn validate(&self) -> ConfigResult<()> {
        let mut chars = self.symbol_prefix.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };

        if !valid {
            return Err(ConfigError::ValidationError(format!(
                "symbol_prefix must be a C identifier, got {:?}",
                self.symbol_prefix
            )));
        }

        Ok(())
    }
}
