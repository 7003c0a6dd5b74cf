//! Rendering of compiled bundles.
//!
//! [`CSourceEmitter`] produces the translation unit and header linked into the
//! firmware; [`JsonEmitter`] dumps the bundle for inspection and tooling.

mod c_source;
mod error;
mod escape;
mod json;

pub use c_source::CSourceEmitter;
pub use error::{EmitError, EmitResult};
pub use json::JsonEmitter;

use crate::config::{OutputConfig, OutputFormat};
use crate::tables::TrieBundle;

/// Renders a bundle as text.
pub trait BundleEmitter {
    /// Renders the primary output document.
    fn emit(&self, bundle: &TrieBundle) -> EmitResult<String>;

    /// Renders the companion header, if the format has one.
    fn header(&self, _bundle: &TrieBundle) -> EmitResult<Option<String>> {
        Ok(None)
    }
}

/// Builds the emitter for `format`, taking symbol names from `output`.
pub fn emitter_for(format: OutputFormat, output: &OutputConfig) -> Box<dyn BundleEmitter> {
    match format {
        OutputFormat::C => Box::new(CSourceEmitter::new(output.symbol_prefix.clone())),
        OutputFormat::Json => Box::new(JsonEmitter::new()),
    }
}
