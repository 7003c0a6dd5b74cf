// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Flat, index-addressed tables produced by the trie compiler.
//!
//! A [`TrieBundle`] is the sole output of a compilation. It holds four flat
//! tables plus a string pool, all addressed by 16-bit indices so a firmware
//! can traverse them straight out of flash:
//!
//! * `nodes` - one [`CompiledNode`] per trie node, root at index 0
//! * `hash_tables` - one [`HashTable`] per node that has children
//! * `buckets` - chain heads (hash entry indices), contiguous per table
//! * `hash_entries` - [`HashEntry`] chain links
//! * `string_pool` - null-terminated payloads addressed by byte offset
//!
//! # Example
//!
//! ```
//! use expando_lib::compiler::TrieCompiler;
//! use expando_lib::mapping::RawExpansion;
//!
//! let compiler = TrieCompiler::default();
//! let report = compiler
//!     .compile(vec![
//!         RawExpansion::new("brb", "be right back"),
//!         RawExpansion::new("btw", "by the way"),
//!     ])
//!     .unwrap();
//!
//! let bundle = report.bundle;
//! assert_eq!(bundle.lookup("brb"), Some("be right back"));
//! assert_eq!(bundle.lookup("br"), None);
//! assert_eq!(bundle.max_trigger_length, 3);
//! ```

mod assembler;
mod hash_table;
mod string_pool;

use serde::Serialize;

use crate::trie::{TableKind, TrieError, TrieResult};

pub use assembler::assemble;
pub use hash_table::{bucket_count_for, CompiledHashTables, HashTableCompiler};
pub use string_pool::{PackedStringPool, StringPoolPacker};

/// Sentinel meaning "no such reference" in every index column.
pub const NULL_INDEX: u16 = u16::MAX;

/// Largest number of items any single table (or the pool's offset range) may hold.
///
/// Valid indices are `0..MAX_TABLE_LEN`, which keeps every one of them
/// strictly below [`NULL_INDEX`].
pub const MAX_TABLE_LEN: usize = u16::MAX as usize - 1;

/// Narrows a table position to a 16-bit index, failing instead of truncating.
pub(crate) fn table_index(position: usize, table: TableKind) -> TrieResult<u16> {
    if position >= MAX_TABLE_LEN {
        return Err(TrieError::CapacityExceeded {
            table,
            required: position + 1,
            limit: MAX_TABLE_LEN,
        });
    }
    Ok(position as u16)
}

/// A trie node in its compiled, flat form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompiledNode {
    /// Index into `hash_tables`, or [`NULL_INDEX`] if the node has no children.
    pub hash_table_index: u16,

    /// Byte offset into the string pool, or [`NULL_INDEX`] if non-terminal.
    pub payload_offset: u16,

    /// Whether a trigger ends at this node.
    pub is_terminal: bool,

    /// Whether the runtime should keep the typed trigger when expanding.
    pub preserve_trigger: bool,
}

/// Location of one node's buckets inside the flat bucket array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HashTable {
    /// First bucket of this table in `buckets`.
    pub buckets_start_index: u16,

    /// Number of buckets, always a power of two.
    pub bucket_count: u16,
}

impl HashTable {
    /// Bucket slot (relative to `buckets_start_index`) a character hashes to.
    #[inline]
    pub fn bucket_of(&self, key: char) -> usize {
        (key as u32 % u32::from(self.bucket_count)) as usize
    }
}

/// One link of a bucket's collision chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HashEntry {
    /// Character this entry matches.
    pub key: char,

    /// Node reached by consuming `key`.
    pub child_node_index: u16,

    /// Next entry in the same bucket, or [`NULL_INDEX`] at the chain tail.
    pub next_entry_index: u16,
}

/// The immutable output of one trie compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrieBundle {
    /// Node table, root first.
    pub nodes: Vec<CompiledNode>,

    /// One hash table per node with children, in node index order.
    pub hash_tables: Vec<HashTable>,

    /// Chain heads for every table, flattened.
    pub buckets: Vec<u16>,

    /// Collision chain links.
    pub hash_entries: Vec<HashEntry>,

    /// Null-separated payload bytes.
    pub string_pool: Vec<u8>,

    /// Length in characters of the longest trigger in the input.
    pub max_trigger_length: usize,
}

impl TrieBundle {
    /// Index of the root node.
    pub const ROOT: u16 = 0;

    /// Number of nodes in the node table.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the compiled node at `index`.
    pub fn node(&self, index: u16) -> Option<&CompiledNode> {
        self.nodes.get(usize::from(index))
    }

    /// Returns the null-terminated payload starting at `offset`.
    ///
    /// # Returns
    ///
    /// * `Some(&str)` - The payload, without its terminator.
    /// * `None` - If `offset` is the sentinel, lies outside the pool, or the
    ///   bytes up to the next terminator are not valid UTF-8.
    pub fn payload_at(&self, offset: u16) -> Option<&str> {
        if offset == NULL_INDEX {
            return None;
        }
        let tail = self.string_pool.get(usize::from(offset)..)?;
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        std::str::from_utf8(&tail[..end]).ok()
    }

    /// Follows the edge labelled `key` out of `node`.
    ///
    /// Hashes the character into the node's table and walks the bucket's
    /// chain until the key matches or the chain ends.
    pub fn child(&self, node: u16, key: char) -> Option<u16> {
        let table_index = self.node(node)?.hash_table_index;
        if table_index == NULL_INDEX {
            return None;
        }
        let table = self.hash_tables.get(usize::from(table_index))?;
        let slot = usize::from(table.buckets_start_index) + table.bucket_of(key);
        let mut cursor = *self.buckets.get(slot)?;

        while cursor != NULL_INDEX {
            let entry = self.hash_entries.get(usize::from(cursor))?;
            if entry.key == key {
                return Some(entry.child_node_index);
            }
            cursor = entry.next_entry_index;
        }
        None
    }

    /// Walks from the root along `trigger`, terminal or not.
    pub fn node_for(&self, trigger: &str) -> Option<u16> {
        trigger
            .chars()
            .try_fold(Self::ROOT, |node, key| self.child(node, key))
    }

    /// Returns the payload stored for `trigger` if it ends on a terminal node.
    pub fn lookup(&self, trigger: &str) -> Option<&str> {
        let node = self.node(self.node_for(trigger)?)?;
        if !node.is_terminal {
            return None;
        }
        self.payload_at(node.payload_offset)
    }
}
