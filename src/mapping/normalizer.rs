//! Mapping normalization.
//!
//! Validates raw entries, resolves codepoint directives and the
//! trigger-preservation default, and collapses duplicate triggers. A bad
//! entry is dropped with a [`Diagnostic`]; it never aborts the batch.

use fnv::{FnvHashMap, FnvHashSet};
use tracing::debug;

use super::diagnostic::{Diagnostic, DiagnosticSink};
use super::directive::resolve_codepoints;
use super::{NormalizedEntry, NormalizedMapping, RawExpansion};
use crate::config::compiler::{CompilerConfig, DEFAULT_ALPHABET, DEFAULT_RESET_CHAR};
use crate::error::config::ConfigError;

/// Resolves an entry's trigger preservation against its group default.
///
/// An explicit per-entry setting wins; otherwise the group default applies.
#[inline]
pub fn resolve(group_default: bool, entry_override: Option<bool>) -> bool {
    entry_override.unwrap_or(group_default)
}

/// Validation rules applied to each entry.
#[derive(Debug, Clone)]
pub struct NormalizationRules {
    /// Reserved character that may not appear in a trigger
    pub reset_char: char,

    /// Characters allowed in triggers (None accepts any character)
    pub alphabet: Option<FnvHashSet<char>>,

    /// Longest trigger accepted, in characters
    pub max_trigger_length: Option<usize>,

    /// Whether empty payloads are kept
    pub allow_empty_payload: bool,
}

impl Default for NormalizationRules {
    fn default() -> Self {
        Self {
            reset_char: DEFAULT_RESET_CHAR,
            alphabet: Some(DEFAULT_ALPHABET.chars().collect()),
            max_trigger_length: None,
            allow_empty_payload: false,
        }
    }
}

impl TryFrom<&CompilerConfig> for NormalizationRules {
    type Error = ConfigError;

    fn try_from(config: &CompilerConfig) -> Result<Self, Self::Error> {
        let alphabet = if config.alphabet.is_empty() {
            None
        } else {
            Some(config.alphabet.chars().collect())
        };
        Ok(Self {
            reset_char: config.reset_char()?,
            alphabet,
            max_trigger_length: config.max_trigger_length,
            allow_empty_payload: config.allow_empty_payload,
        })
    }
}

/// Turns raw mapping entries into the builder's input.
#[derive(Debug, Clone, Default)]
pub struct MappingNormalizer {
    rules: NormalizationRules,
}

impl MappingNormalizer {
    /// Creates a normalizer applying `rules`.
    pub fn new(rules: NormalizationRules) -> Self {
        Self { rules }
    }

    /// The rules in effect.
    pub fn rules(&self) -> &NormalizationRules {
        &self.rules
    }

    /// Normalizes `entries`, reporting every dropped or overridden entry to `sink`.
    ///
    /// Duplicate triggers keep the payload of the last definition.
    pub fn normalize<I>(&self, entries: I, sink: &mut dyn DiagnosticSink) -> NormalizedMapping
    where
        I: IntoIterator<Item = RawExpansion>,
    {
        let mut mapping = NormalizedMapping::default();
        let mut positions: FnvHashMap<String, usize> = FnvHashMap::default();

        for raw in entries {
            let entry = match self.check(raw) {
                Ok(entry) => entry,
                Err(diagnostic) => {
                    sink.emit(&diagnostic);
                    mapping.skipped += 1;
                    continue;
                }
            };

            match positions.get(&entry.trigger) {
                Some(&position) => {
                    let previous = std::mem::replace(&mut mapping.entries[position], entry);
                    let current = &mapping.entries[position];
                    sink.emit(&Diagnostic::DuplicateTrigger {
                        trigger: current.trigger.clone(),
                        previous: previous.payload,
                        replacement: current.payload.clone(),
                    });
                    mapping.overridden += 1;
                }
                None => {
                    positions.insert(entry.trigger.clone(), mapping.entries.len());
                    mapping.entries.push(entry);
                }
            }
        }

        debug!(
            entries = mapping.entries.len(),
            skipped = mapping.skipped,
            overridden = mapping.overridden,
            "Normalized mapping"
        );
        mapping
    }

    fn check(&self, raw: RawExpansion) -> Result<NormalizedEntry, Diagnostic> {
        let RawExpansion {
            trigger,
            text,
            preserve_trigger,
            group_default,
        } = raw;

        if trigger.contains(self.rules.reset_char) {
            return Err(Diagnostic::ResetCharacter {
                trigger,
                reset_char: self.rules.reset_char,
            });
        }

        if let Some(alphabet) = &self.rules.alphabet {
            if let Some(character) = trigger.chars().find(|c| !alphabet.contains(c)) {
                return Err(Diagnostic::UnsupportedCharacter { trigger, character });
            }
        }

        if let Some(max_length) = self.rules.max_trigger_length {
            let length = trigger.chars().count();
            if length > max_length {
                return Err(Diagnostic::TriggerTooLong {
                    trigger,
                    length,
                    max_length,
                });
            }
        }

        let payload = match resolve_codepoints(&text) {
            Ok(resolved) => resolved.into_owned(),
            Err(invalid) => {
                return Err(Diagnostic::InvalidDirective {
                    trigger,
                    directive: invalid.0,
                })
            }
        };

        if let Some(position) = payload.find('\0') {
            return Err(Diagnostic::NulInPayload { trigger, position });
        }

        if payload.is_empty() && !self.rules.allow_empty_payload {
            return Err(Diagnostic::EmptyPayload { trigger });
        }

        Ok(NormalizedEntry {
            trigger,
            payload,
            preserve_trigger: resolve(group_default, preserve_trigger),
        })
    }
}
