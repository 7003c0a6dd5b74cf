// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Packing of terminal payloads into a single null-separated byte pool.

use tracing::debug;

use super::{table_index, NULL_INDEX};
use crate::trie::{IndexedTrie, TableKind, TrieError, TrieResult};

/// Output of the string pool packer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedStringPool {
    /// Every terminal payload followed by one null byte, in node index order.
    pub bytes: Vec<u8>,

    /// Per node (by index): payload offset, or [`NULL_INDEX`] if non-terminal.
    pub offsets: Vec<u16>,
}

/// Packs payloads of an indexed trie into one contiguous pool.
///
/// A terminal's offset is the pool length at the moment its payload is
/// appended, so offsets increase with node index. Payloads are not
/// deduplicated; the consumer finds a payload's end by its null terminator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringPoolPacker;

impl StringPoolPacker {
    /// Creates a new packer.
    pub fn new() -> Self {
        Self
    }

    /// Packs every terminal payload in node index order.
    ///
    /// # Returns
    ///
    /// * `Ok(PackedStringPool)` - Pool bytes and per-node offsets.
    /// * `Err(TrieError)` - If an offset does not fit below the null sentinel,
    ///   or a terminal node carries no payload or one containing a null byte.
    pub fn pack(&self, trie: &IndexedTrie) -> TrieResult<PackedStringPool> {
        let mut pool = PackedStringPool {
            bytes: Vec::new(),
            offsets: Vec::with_capacity(trie.len()),
        };

        for (node_index, node) in trie.nodes().iter().enumerate() {
            if !node.is_terminal {
                pool.offsets.push(NULL_INDEX);
                continue;
            }
            let payload = node.payload.as_deref().ok_or_else(|| {
                TrieError::Internal(format!("terminal node {node_index} has no payload"))
            })?;
            if payload.as_bytes().contains(&0) {
                return Err(TrieError::Internal(format!(
                    "payload of node {node_index} contains a null byte"
                )));
            }

            let offset = table_index(pool.bytes.len(), TableKind::StringPool)?;
            pool.bytes.extend_from_slice(payload.as_bytes());
            pool.bytes.push(0);
            pool.offsets.push(offset);
        }

        debug!(bytes = pool.bytes.len(), "Packed string pool");
        Ok(pool)
    }
}
