// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Deterministic node indexing.
//!
//! Nodes are numbered breadth-first from the root, visiting children in
//! character order. Downstream tables refer to nodes only by these numbers,
//! so identical logical input always yields identical indices.

use std::collections::VecDeque;

use tracing::debug;

use super::builder::TrieBuilder;
use super::error::{TableKind, TrieError, TrieResult};
use super::node::NodeId;
use crate::tables::MAX_TABLE_LEN;

/// A node at its final table position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedNode {
    /// Outgoing edges as (character, child index), sorted by character.
    pub children: Vec<(char, u16)>,

    /// Payload of the trigger ending here.
    pub payload: Option<String>,

    /// Whether a trigger ends here.
    pub is_terminal: bool,

    /// Whether the runtime keeps the typed trigger.
    pub preserve_trigger: bool,
}

/// The frozen trie: nodes in index order, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedTrie {
    nodes: Vec<IndexedNode>,
    max_trigger_length: usize,
}

impl IndexedTrie {
    /// Nodes in index order.
    pub fn nodes(&self) -> &[IndexedNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; the root is present even for an empty mapping.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Length in characters of the longest trigger.
    pub fn max_trigger_length(&self) -> usize {
        self.max_trigger_length
    }
}

/// Assigns every node of `builder` its final index and freezes the tree.
///
/// # Returns
///
/// * `Ok(IndexedTrie)` - Nodes in breadth-first, character-sorted order.
/// * `Err(TrieError::CapacityExceeded)` - If the node count does not fit the
///   16-bit index space.
pub fn index(builder: TrieBuilder) -> TrieResult<IndexedTrie> {
    let (mut arena, max_trigger_length) = builder.into_arena();

    if arena.len() > MAX_TABLE_LEN {
        return Err(TrieError::CapacityExceeded {
            table: TableKind::Nodes,
            required: arena.len(),
            limit: MAX_TABLE_LEN,
        });
    }

    // Arena slot -> final index
    let mut slot_to_index: Vec<Option<u16>> = vec![None; arena.len()];
    let mut order: Vec<NodeId> = Vec::with_capacity(arena.len());
    let mut queue = VecDeque::from([NodeId::ROOT]);
    slot_to_index[NodeId::ROOT.slot()] = Some(0);

    while let Some(id) = queue.pop_front() {
        order.push(id);
        for (_, child) in arena[id.slot()].sorted_children() {
            let next = order.len() + queue.len();
            slot_to_index[child.slot()] = Some(next as u16);
            queue.push_back(child);
        }
    }

    if order.len() != arena.len() {
        return Err(TrieError::Internal(format!(
            "indexed {} of {} allocated nodes",
            order.len(),
            arena.len()
        )));
    }

    let mut nodes = Vec::with_capacity(order.len());
    for id in order {
        let node = std::mem::take(&mut arena[id.slot()]);
        let children = node
            .sorted_children()
            .into_iter()
            .map(|(key, child)| {
                slot_to_index[child.slot()]
                    .map(|index| (key, index))
                    .ok_or_else(|| {
                        TrieError::Internal(format!("child slot {} has no index", child.slot()))
                    })
            })
            .collect::<TrieResult<Vec<_>>>()?;

        nodes.push(IndexedNode {
            children,
            payload: node.payload,
            is_terminal: node.is_terminal,
            preserve_trigger: node.preserve_trigger,
        });
    }

    debug!(
        nodes = nodes.len(),
        max_trigger_length, "Indexed trie nodes breadth-first"
    );

    Ok(IndexedTrie {
        nodes,
        max_trigger_length,
    })
}
