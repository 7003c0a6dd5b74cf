// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Builder-side prefix tree and the freeze step that indexes it.
//!
//! [`TrieBuilder`] is the mutable half: an arena of [`TrieNode`]s that grows
//! as triggers are inserted. [`TrieBuilder::freeze`] consumes it and returns
//! an [`IndexedTrie`] whose nodes sit at their final, deterministic table
//! positions. Nothing in the indexed form aliases the builder.

mod builder;
mod error;
mod indexer;
mod node;

pub use builder::TrieBuilder;
pub use error::{TableKind, TrieError, TrieResult};
pub use indexer::{index, IndexedNode, IndexedTrie};
pub use node::{NodeId, TrieNode};
