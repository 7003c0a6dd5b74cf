// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Arena-backed trie construction.

use tracing::trace;

use super::indexer::{index, IndexedTrie};
use super::node::{NodeId, TrieNode};
use super::TrieResult;

/// Mutable prefix tree used while reading the normalized mapping.
///
/// Every node is allocated into `arena` when it is created; the root always
/// occupies slot 0. The same set of (key, payload) pairs yields the same tree
/// shape no matter in which order they are inserted.
#[derive(Debug)]
pub struct TrieBuilder {
    arena: Vec<TrieNode>,
    key_count: usize,
    max_key_length: usize,
}

impl TrieBuilder {
    /// Creates a builder holding only the root node.
    pub fn new() -> Self {
        Self {
            arena: vec![TrieNode::new()],
            key_count: 0,
            max_key_length: 0,
        }
    }

    /// Inserts a trigger and its payload.
    ///
    /// Descends from the root creating missing children, then marks the final
    /// node terminal and stores the payload and trigger-preservation flag. An
    /// empty key makes the root terminal. Re-inserting a key replaces its
    /// payload and flag.
    ///
    /// # Returns
    ///
    /// `true` if the key was not present before, `false` if it was replaced.
    pub fn insert<P>(&mut self, key: &str, payload: P, preserve_trigger: bool) -> bool
    where
        P: Into<String>,
    {
        let mut current = NodeId::ROOT;
        let mut length = 0;
        for c in key.chars() {
            current = self.child_or_insert(current, c);
            length += 1;
        }

        let node = &mut self.arena[current.slot()];
        let is_new = !node.is_terminal;
        node.is_terminal = true;
        node.payload = Some(payload.into());
        node.preserve_trigger = preserve_trigger;

        if is_new {
            self.key_count += 1;
        }
        self.max_key_length = self.max_key_length.max(length);
        trace!(key, is_new, "Inserted trigger");
        is_new
    }

    fn child_or_insert(&mut self, parent: NodeId, key: char) -> NodeId {
        if let Some(&existing) = self.arena[parent.slot()].children.get(&key) {
            return existing;
        }
        let id = NodeId(self.arena.len());
        self.arena.push(TrieNode::new());
        self.arena[parent.slot()].children.insert(key, id);
        id
    }

    /// Returns the node stored in `id`'s arena slot.
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.arena.get(id.slot())
    }

    /// Number of nodes allocated so far, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of distinct triggers inserted.
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Length in characters of the longest trigger inserted.
    pub fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    /// Whether no trigger has been inserted.
    pub fn is_empty(&self) -> bool {
        self.key_count == 0
    }

    /// Consumes the builder and assigns every node its final table index.
    pub fn freeze(self) -> TrieResult<IndexedTrie> {
        index(self)
    }

    pub(super) fn into_arena(self) -> (Vec<TrieNode>, usize) {
        (self.arena, self.max_key_length)
    }
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}
