// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the builder-side trie.
//!
//! Nodes live in an arena owned by [`super::TrieBuilder`] and refer to their
//! children by arena slot. A slot is the node's identity for the lifetime of
//! one build; final table positions are assigned later by the indexer.

use fnv::FnvHashMap;

/// Arena slot of a builder-side node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Slot of the root node.
    pub const ROOT: NodeId = NodeId(0);

    /// Raw arena position.
    pub fn slot(self) -> usize {
        self.0
    }
}

/// A node in the builder-side trie.
///
/// Each node represents one character on a trigger path. Terminal nodes carry
/// the payload of the trigger that ends there.
#[derive(Debug, Default)]
pub struct TrieNode {
    /// Map of characters to child slots. Iteration order is meaningless;
    /// callers sort with [`TrieNode::sorted_children`].
    pub children: FnvHashMap<char, NodeId>,

    /// Whether this node represents the end of a trigger
    pub is_terminal: bool,

    /// Payload of the trigger ending here (terminal nodes only)
    pub payload: Option<String>,

    /// Whether the runtime keeps the typed trigger before the expansion
    pub preserve_trigger: bool,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Children ordered by character code.
    pub fn sorted_children(&self) -> Vec<(char, NodeId)> {
        let mut children: Vec<(char, NodeId)> =
            self.children.iter().map(|(&key, &id)| (key, id)).collect();
        children.sort_unstable_by_key(|&(key, _)| key);
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_children_orders_by_char() {
        let mut node = TrieNode::new();
        node.children.insert('z', NodeId(1));
        node.children.insert('0', NodeId(2));
        node.children.insert('m', NodeId(3));

        let keys: Vec<char> = node.sorted_children().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!['0', 'm', 'z']);
    }
}
