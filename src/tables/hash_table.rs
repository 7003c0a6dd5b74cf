// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Per-node child hash tables.
//!
//! Every node with at least one child gets a closed table of power-of-two
//! size with separate chaining. Tables are sized once, before any entry is
//! placed, so they never resize. Entries are prepended to their bucket's
//! chain; a consumer walks the chain comparing keys until it finds a match or
//! reaches [`NULL_INDEX`].

use tracing::debug;

use super::{table_index, HashEntry, HashTable, NULL_INDEX};
use crate::trie::{IndexedTrie, TableKind, TrieError, TrieResult};

/// Number of buckets for a node with `children` children.
///
/// One bucket for a single child, otherwise the smallest power of two that
/// is at least the child count.
pub fn bucket_count_for(children: usize) -> usize {
    if children <= 1 {
        1
    } else {
        children.next_power_of_two()
    }
}

/// Output of the hash table compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledHashTables {
    /// Per node (by index): its table, or [`NULL_INDEX`] if it has no children.
    pub node_tables: Vec<u16>,

    /// Table descriptors in node index order.
    pub tables: Vec<HashTable>,

    /// Flattened chain heads.
    pub buckets: Vec<u16>,

    /// Chain links.
    pub entries: Vec<HashEntry>,
}

/// Builds the hash table, bucket and entry arrays for an indexed trie.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashTableCompiler;

impl HashTableCompiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self
    }

    /// Compiles one table per node with children, in node index order.
    ///
    /// Children are placed in character order, which the indexer guarantees
    /// for [`crate::trie::IndexedNode::children`].
    ///
    /// # Returns
    ///
    /// * `Ok(CompiledHashTables)` - The flat arrays.
    /// * `Err(TrieError)` - If an array outgrows the 16-bit index space or a
    ///   child refers to a node that does not exist.
    pub fn compile(&self, trie: &IndexedTrie) -> TrieResult<CompiledHashTables> {
        let node_count = trie.len();
        let mut out = CompiledHashTables {
            node_tables: Vec::with_capacity(node_count),
            ..Default::default()
        };

        for (node_index, node) in trie.nodes().iter().enumerate() {
            if node.children.is_empty() {
                out.node_tables.push(NULL_INDEX);
                continue;
            }

            let table = table_index(out.tables.len(), TableKind::HashTables)?;
            let bucket_count = bucket_count_for(node.children.len());
            let start = out.buckets.len();
            // The last bucket of this table must still be addressable.
            table_index(start + bucket_count - 1, TableKind::Buckets)?;

            let mut buckets = vec![NULL_INDEX; bucket_count];
            for &(key, child) in &node.children {
                if usize::from(child) >= node_count {
                    return Err(TrieError::Internal(format!(
                        "node {node_index} points at missing child {child}"
                    )));
                }
                let entry_index = table_index(out.entries.len(), TableKind::HashEntries)?;
                let slot = (key as u32 % bucket_count as u32) as usize;
                out.entries.push(HashEntry {
                    key,
                    child_node_index: child,
                    next_entry_index: buckets[slot],
                });
                buckets[slot] = entry_index;
            }

            out.tables.push(HashTable {
                buckets_start_index: start as u16,
                bucket_count: bucket_count as u16,
            });
            out.buckets.extend(buckets);
            out.node_tables.push(table);
        }

        debug!(
            tables = out.tables.len(),
            buckets = out.buckets.len(),
            entries = out.entries.len(),
            "Compiled child hash tables"
        );
        Ok(out)
    }
}
