//! Trigger to payload mappings.
//!
//! A mapping arrives as a document of groups ([`document`]), is flattened into
//! [`RawExpansion`] entries, and is normalized ([`normalizer`]) into the
//! deduplicated, fully resolved entries the trie builder consumes.

pub mod diagnostic;
pub mod directive;
pub mod document;
pub mod normalizer;

pub use diagnostic::{Diagnostic, DiagnosticLog, DiagnosticSink};
pub use directive::{resolve_codepoints, InvalidDirective};
pub use document::MappingDocument;
pub use normalizer::{resolve, MappingNormalizer, NormalizationRules};

/// One trigger definition as written, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpansion {
    /// Characters typed to fire the expansion
    pub trigger: String,

    /// Expansion text, possibly holding codepoint directives
    pub text: String,

    /// Per-entry trigger preservation, if the entry sets one
    pub preserve_trigger: Option<bool>,

    /// Trigger preservation of the enclosing group
    pub group_default: bool,
}

impl RawExpansion {
    /// Creates an entry with no override and a `false` group default.
    pub fn new(trigger: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            text: text.into(),
            preserve_trigger: None,
            group_default: false,
        }
    }

    /// Sets the per-entry trigger preservation override.
    pub fn with_preserve_trigger(mut self, preserve: bool) -> Self {
        self.preserve_trigger = Some(preserve);
        self
    }

    /// Sets the enclosing group's default.
    pub fn with_group_default(mut self, preserve: bool) -> Self {
        self.group_default = preserve;
        self
    }
}

/// A validated entry ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    /// The trigger
    pub trigger: String,

    /// Payload with every codepoint directive resolved
    pub payload: String,

    /// Resolved trigger preservation
    pub preserve_trigger: bool,
}

/// Output of normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedMapping {
    /// One entry per distinct trigger, in first-definition order
    pub entries: Vec<NormalizedEntry>,

    /// Number of entries dropped
    pub skipped: usize,

    /// Number of entries that replaced an earlier definition
    pub overridden: usize,
}

impl NormalizedMapping {
    /// Number of distinct triggers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no trigger survived normalization.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
