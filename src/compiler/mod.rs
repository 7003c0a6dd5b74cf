// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! One-pass compilation of a mapping into a [`TrieBundle`].
//!
//! The pipeline is normalize, build, index (freeze), then compile the hash
//! tables and pack the string pool, then assemble. Each stage consumes the
//! previous one's output; nothing is shared between compilations, so
//! independent compilations may run on different threads.

#[cfg(test)]
mod tests;

use tracing::{debug, info};

use crate::config::{CompilerConfig, ConfigResult};
use crate::mapping::{
    Diagnostic, DiagnosticLog, DiagnosticSink, MappingNormalizer, NormalizationRules,
    NormalizedMapping, RawExpansion,
};
use crate::tables::{assemble, HashTableCompiler, StringPoolPacker, TrieBundle};
use crate::trie::{TrieBuilder, TrieResult};

/// Result of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    /// The compiled tables
    pub bundle: TrieBundle,

    /// Entries that were dropped or overridden, in input order
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileReport {
    /// Number of entries dropped during normalization.
    pub fn skipped(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_skip()).count()
    }

    /// Number of entries that replaced an earlier definition of their trigger.
    pub fn overridden(&self) -> usize {
        self.diagnostics.len() - self.skipped()
    }
}

/// Drives a mapping through every compilation stage.
#[derive(Debug, Clone, Default)]
pub struct TrieCompiler {
    normalizer: MappingNormalizer,
}

impl TrieCompiler {
    /// Creates a compiler applying `rules` during normalization.
    pub fn new(rules: NormalizationRules) -> Self {
        Self {
            normalizer: MappingNormalizer::new(rules),
        }
    }

    /// Creates a compiler from the `[compiler]` configuration section.
    pub fn from_config(config: &CompilerConfig) -> ConfigResult<Self> {
        Ok(Self::new(NormalizationRules::try_from(config)?))
    }

    /// Normalizes and compiles `entries`.
    ///
    /// Skippable entry problems are logged and collected in the report;
    /// only capacity and internal errors fail the compilation.
    pub fn compile<I>(&self, entries: I) -> TrieResult<CompileReport>
    where
        I: IntoIterator<Item = RawExpansion>,
    {
        let mut log = DiagnosticLog::new();
        let mapping = self.normalize(entries, &mut log);
        let bundle = self.compile_normalized(&mapping)?;

        let report = CompileReport {
            bundle,
            diagnostics: log.into_entries(),
        };
        info!(
            triggers = mapping.len(),
            nodes = report.bundle.node_count(),
            skipped = report.skipped(),
            overridden = report.overridden(),
            "Compiled expansion trie"
        );
        Ok(report)
    }

    /// Normalizes `entries`, sending diagnostics to `sink`.
    pub fn normalize<I>(&self, entries: I, sink: &mut dyn DiagnosticSink) -> NormalizedMapping
    where
        I: IntoIterator<Item = RawExpansion>,
    {
        self.normalizer.normalize(entries, sink)
    }

    /// Compiles an already normalized mapping.
    pub fn compile_normalized(&self, mapping: &NormalizedMapping) -> TrieResult<TrieBundle> {
        let mut builder = TrieBuilder::new();
        for entry in &mapping.entries {
            builder.insert(&entry.trigger, entry.payload.as_str(), entry.preserve_trigger);
        }
        debug!(
            keys = builder.key_count(),
            nodes = builder.node_count(),
            "Built trie"
        );

        let trie = builder.freeze()?;
        let hashes = HashTableCompiler::new().compile(&trie)?;
        let pool = StringPoolPacker::new().pack(&trie)?;
        debug!(
            hash_tables = hashes.tables.len(),
            buckets = hashes.buckets.len(),
            hash_entries = hashes.entries.len(),
            pool_bytes = pool.bytes.len(),
            "Compiled tables"
        );

        assemble(&trie, hashes, pool)
    }
}
