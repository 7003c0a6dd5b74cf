//! Compiler configuration module.
//!
//! Rules applied to mapping entries before they reach the trie builder.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Characters accepted in triggers by default: lowercase ASCII letters and digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Character that resets the runtime's trigger buffer by default.
pub const DEFAULT_RESET_CHAR: char = ' ';

/// Compiler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Reserved character that may not appear in triggers (a one-character string)
    pub reset_char: String,

    /// Characters allowed in triggers; empty disables the check
    pub alphabet: String,

    /// Longest trigger accepted, in characters (None for no limit)
    pub max_trigger_length: Option<usize>,

    /// Whether entries with an empty expansion are kept
    pub allow_empty_payload: bool,

    /// Trigger preservation for groups that do not set their own default
    pub default_preserve_trigger: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            reset_char: DEFAULT_RESET_CHAR.to_string(),
            alphabet: DEFAULT_ALPHABET.to_string(),
            max_trigger_length: None,
            allow_empty_payload: false,
            default_preserve_trigger: false,
        }
    }
}

impl CompilerConfig {
    /// The reserved reset character.
    ///
    /// # Returns
    ///
    /// * `Ok(char)` - If `reset_char` holds exactly one character
    /// * `Err(ConfigError)` - Otherwise
    pub fn reset_char(&self) -> ConfigResult<char> {
        let mut chars = self.reset_char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConfigError::ValidationError(format!(
                "reset_char must be exactly one character, got {:?}",
                self.reset_char
            ))),
        }
    }
}

impl Validate for CompilerConfig {
    fn validate(&self) -> ConfigResult<()> {
        let reset_char = self.reset_char()?;

        if self.alphabet.contains(reset_char) {
            return Err(ConfigError::ValidationError(format!(
                "alphabet must not contain the reset character {reset_char:?}"
            )));
        }

        if self.max_trigger_length == Some(0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "compiler.max_trigger_length".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }

        Ok(())
    }
}
