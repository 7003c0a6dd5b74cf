//! Diagnostics for mapping entries that were skipped or overridden.

use std::fmt;

/// A non-fatal problem found while normalizing one mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The trigger contains the reserved reset character; entry dropped.
    ResetCharacter {
        /// The offending trigger
        trigger: String,
        /// The reserved character
        reset_char: char,
    },

    /// The trigger contains a character outside the alphabet; entry dropped.
    UnsupportedCharacter {
        /// The offending trigger
        trigger: String,
        /// First character not in the alphabet
        character: char,
    },

    /// The trigger is longer than the configured maximum; entry dropped.
    TriggerTooLong {
        /// The offending trigger
        trigger: String,
        /// Length in characters
        length: usize,
        /// Configured maximum
        max_length: usize,
    },

    /// The payload is empty and empty payloads are not allowed; entry dropped.
    EmptyPayload {
        /// The trigger whose payload is empty
        trigger: String,
    },

    /// A codepoint directive does not name a valid character; entry dropped.
    InvalidDirective {
        /// The trigger whose payload holds the directive
        trigger: String,
        /// The directive text as written
        directive: String,
    },

    /// The payload contains a NUL character, which terminates pool strings;
    /// entry dropped.
    NulInPayload {
        /// The trigger whose payload holds the NUL
        trigger: String,
        /// Byte offset of the first NUL in the resolved payload
        position: usize,
    },

    /// A later entry redefined a trigger; the later payload wins.
    DuplicateTrigger {
        /// The repeated trigger
        trigger: String,
        /// Payload that was replaced
        previous: String,
        /// Payload that is kept
        replacement: String,
    },
}

impl Diagnostic {
    /// The trigger the diagnostic is about.
    pub fn trigger(&self) -> &str {
        match self {
            Diagnostic::ResetCharacter { trigger, .. }
            | Diagnostic::UnsupportedCharacter { trigger, .. }
            | Diagnostic::TriggerTooLong { trigger, .. }
            | Diagnostic::EmptyPayload { trigger }
            | Diagnostic::InvalidDirective { trigger, .. }
            | Diagnostic::NulInPayload { trigger, .. }
            | Diagnostic::DuplicateTrigger { trigger, .. } => trigger,
        }
    }

    /// Whether the entry was dropped (as opposed to overriding another one).
    pub fn is_skip(&self) -> bool {
        !matches!(self, Diagnostic::DuplicateTrigger { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ResetCharacter {
                trigger,
                reset_char,
            } => write!(
                f,
                "trigger '{trigger}' contains the reset character {reset_char:?}; skipping"
            ),
            Diagnostic::UnsupportedCharacter { trigger, character } => write!(
                f,
                "trigger '{trigger}' contains unsupported character {character:?}; skipping"
            ),
            Diagnostic::TriggerTooLong {
                trigger,
                length,
                max_length,
            } => write!(
                f,
                "trigger '{trigger}' is {length} characters long, maximum is {max_length}; skipping"
            ),
            Diagnostic::EmptyPayload { trigger } => {
                write!(f, "trigger '{trigger}' has an empty expansion; skipping")
            }
            Diagnostic::InvalidDirective { trigger, directive } => write!(
                f,
                "expansion of '{trigger}' has invalid codepoint directive '{directive}'; skipping"
            ),
            Diagnostic::NulInPayload { trigger, position } => write!(
                f,
                "expansion of '{trigger}' contains a NUL character at byte {position}; skipping"
            ),
            Diagnostic::DuplicateTrigger {
                trigger,
                previous,
                replacement,
            } => write!(
                f,
                "trigger '{trigger}' defined more than once; '{replacement}' replaces '{previous}'"
            ),
        }
    }
}

/// Receiver for diagnostics raised during normalization.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);
}

/// Sink that logs each diagnostic as a warning and keeps a copy.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics recorded so far.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Consumes the log, returning its diagnostics.
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        tracing::warn!(trigger = diagnostic.trigger(), "{}", diagnostic);
        self.entries.push(diagnostic.clone());
    }
}
