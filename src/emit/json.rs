//! JSON rendering of a bundle.

use super::{BundleEmitter, EmitResult};
use crate::tables::TrieBundle;

/// Pretty-prints the bundle with `serde_json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonEmitter;

impl JsonEmitter {
    /// Creates a JSON emitter.
    pub fn new() -> Self {
        Self
    }
}

impl BundleEmitter for JsonEmitter {
    fn emit(&self, bundle: &TrieBundle) -> EmitResult<String> {
        let mut out = serde_json::to_string_pretty(bundle)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::TrieCompiler;
    use crate::mapping::RawExpansion;
    use crate::tables::NULL_INDEX;

    #[test]
    fn test_json_shape() {
        let bundle = TrieCompiler::default()
            .compile(vec![RawExpansion::new("ok", "okay")])
            .unwrap()
            .bundle;
        let text = JsonEmitter::new().emit(&bundle).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["nodes"][0]["payload_offset"], NULL_INDEX);
        assert_eq!(value["hash_entries"][0]["key"], "o");
        assert_eq!(value["max_trigger_length"], 2);
        assert_eq!(value["string_pool"].as_array().unwrap().len(), 5);
    }
}
