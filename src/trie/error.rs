// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for trie compilation.
//!
//! Both variants are fatal for the whole compilation: the tables cannot be
//! produced correctly, so no partial output is returned.

use std::fmt;

/// The flat table whose 16-bit address range was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The node table
    Nodes,
    /// The hash table descriptor array
    HashTables,
    /// The flattened bucket array
    Buckets,
    /// The hash entry array
    HashEntries,
    /// Byte offsets into the string pool
    StringPool,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableKind::Nodes => "nodes",
            TableKind::HashTables => "hash tables",
            TableKind::Buckets => "hash buckets",
            TableKind::HashEntries => "hash entries",
            TableKind::StringPool => "string pool offsets",
        })
    }
}

/// Errors that can occur while compiling a trie into flat tables.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrieError {
    /// A table would need an index that does not fit below the null sentinel.
    #[error("Table of {table} needs {required} slots, but 16-bit indices address at most {limit}")]
    CapacityExceeded {
        /// The table that overflowed
        table: TableKind,
        /// Number of slots the table would need
        required: usize,
        /// Maximum number of addressable slots
        limit: usize,
    },

    /// A structural invariant was broken between compilation stages.
    #[error("Internal invariant violated: {0}")]
    Internal(String),
}

/// Result type for trie compilation.
pub type TrieResult<T> = Result<T, TrieError>;
