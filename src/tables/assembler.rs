// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Final assembly of the compiled tables into a [`TrieBundle`].

use super::{CompiledHashTables, CompiledNode, PackedStringPool, TrieBundle};
use crate::trie::{IndexedTrie, TrieError, TrieResult};

/// Merges the indexed trie, its hash tables and its string pool.
///
/// # Returns
///
/// * `Ok(TrieBundle)` - The immutable bundle.
/// * `Err(TrieError::Internal)` - If the per-node columns disagree in length.
pub fn assemble(
    trie: &IndexedTrie,
    hashes: CompiledHashTables,
    pool: PackedStringPool,
) -> TrieResult<TrieBundle> {
    if hashes.node_tables.len() != trie.len() || pool.offsets.len() != trie.len() {
        return Err(TrieError::Internal(format!(
            "column length mismatch: {} nodes, {} table refs, {} payload offsets",
            trie.len(),
            hashes.node_tables.len(),
            pool.offsets.len()
        )));
    }

    let nodes = trie
        .nodes()
        .iter()
        .zip(hashes.node_tables.iter().zip(pool.offsets.iter()))
        .map(|(node, (&hash_table_index, &payload_offset))| CompiledNode {
            hash_table_index,
            payload_offset,
            is_terminal: node.is_terminal,
            preserve_trigger: node.preserve_trigger,
        })
        .collect();

    Ok(TrieBundle {
        nodes,
        hash_tables: hashes.tables,
        buckets: hashes.buckets,
        hash_entries: hashes.entries,
        string_pool: pool.bytes,
        max_trigger_length: trie.max_trigger_length(),
    })
}
