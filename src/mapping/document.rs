//! Mapping documents.
//!
//! A document is a list of groups, each with an optional trigger-preservation
//! default and a list of expansions:
//!
//! ```toml
//! [[group]]
//! name = "common"
//! preserve_trigger = false
//!
//! [[group.expansion]]
//! trigger = "brb"
//! text = "be right back"
//! ```
//!
//! JSON documents use the same shape.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RawExpansion;
use crate::error::mapping::MappingError;

/// A parsed mapping document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    /// Groups in declared order
    #[serde(default)]
    pub group: Vec<Group>,
}

/// A named set of expansions sharing a trigger-preservation default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Name used in log output
    #[serde(default)]
    pub name: Option<String>,

    /// Default for entries that do not set their own
    #[serde(default)]
    pub preserve_trigger: Option<bool>,

    /// The group's expansions
    #[serde(default)]
    pub expansion: Vec<Expansion>,
}

/// One expansion as written in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    /// Characters typed to fire the expansion
    pub trigger: String,

    /// Expansion text
    pub text: String,

    /// Override of the group default
    #[serde(default)]
    pub preserve_trigger: Option<bool>,
}

impl MappingDocument {
    /// Reads a document, choosing the parser from the file extension.
    ///
    /// # Arguments
    ///
    /// * `path` - A `.toml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MappingError::FileNotFound(path.to_path_buf()));
        }

        let parse: fn(&str) -> Result<Self, MappingError> =
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => Self::from_toml_str,
                Some("json") => Self::from_json_str,
                _ => return Err(MappingError::UnsupportedFormat(path.to_path_buf())),
            };

        let contents = fs::read_to_string(path).map_err(|source| MappingError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = parse(&contents)?;
        debug!(
            path = %path.display(),
            groups = document.group.len(),
            expansions = document.expansion_count(),
            "Loaded mapping document"
        );
        Ok(document)
    }

    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, MappingError> {
        Ok(toml::from_str(contents)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self, MappingError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Total number of expansions across all groups.
    pub fn expansion_count(&self) -> usize {
        self.group.iter().map(|g| g.expansion.len()).sum()
    }

    /// Flattens the groups, in declared order, into raw entries.
    ///
    /// # Arguments
    ///
    /// * `default_preserve` - Default for groups that do not set one
    pub fn entries(&self, default_preserve: bool) -> Vec<RawExpansion> {
        self.group
            .iter()
            .flat_map(|group| {
                let group_default = group.preserve_trigger.unwrap_or(default_preserve);
                debug!(
                    group = group.name.as_deref().unwrap_or("<unnamed>"),
                    expansions = group.expansion.len(),
                    preserve_trigger = group_default,
                    "Flattening group"
                );
                group.expansion.iter().map(move |e| RawExpansion {
                    trigger: e.trigger.clone(),
                    text: e.text.clone(),
                    preserve_trigger: e.preserve_trigger,
                    group_default,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[[group]]
name = "common"

[[group.expansion]]
trigger = "brb"
text = "be right back"

[[group.expansion]]
trigger = "ty"
text = "thank you"
preserve_trigger = true

[[group]]
name = "symbols"
preserve_trigger = true

[[group.expansion]]
trigger = "deg"
text = "{{u:b0}}"
"#;

    #[test]
    fn test_parse_toml() {
        let doc = MappingDocument::from_toml_str(SAMPLE).unwrap();
        assert_eq!(doc.group.len(), 2);
        assert_eq!(doc.expansion_count(), 3);
        assert_eq!(doc.group[0].name.as_deref(), Some("common"));
    }

    #[test]
    fn test_entries_resolve_group_default() {
        let doc = MappingDocument::from_toml_str(SAMPLE).unwrap();
        let entries = doc.entries(false);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], RawExpansion::new("brb", "be right back"));
        assert_eq!(entries[1].preserve_trigger, Some(true));
        assert!(!entries[1].group_default);
        assert!(entries[2].group_default);
        assert_eq!(entries[2].preserve_trigger, None);

        // The configured default only applies to groups without one.
        let entries = doc.entries(true);
        assert!(entries[0].group_default);
        assert!(entries[2].group_default);
    }

    #[test]
    fn test_parse_json() {
        let doc = MappingDocument::from_json_str(
            r#"{"group":[{"expansion":[{"trigger":"omw","text":"on my way"}]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.entries(false), vec![RawExpansion::new("omw", "on my way")]);
    }

    #[test]
    fn test_empty_document() {
        let doc = MappingDocument::from_toml_str("").unwrap();
        assert!(doc.entries(false).is_empty());
    }

    #[test]
    fn test_missing_field_is_error() {
        let result = MappingDocument::from_toml_str("[[group]]\n[[group.expansion]]\ntrigger = \"x\"\n");
        assert!(matches!(result, Err(MappingError::Toml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let doc = MappingDocument::load(file.path()).unwrap();
        assert_eq!(doc.expansion_count(), 3);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            MappingDocument::load(file.path()),
            Err(MappingError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            MappingDocument::load(dir.path().join("absent.toml")),
            Err(MappingError::FileNotFound(_))
        ));
    }
}
