//! Expando Library
//!
//! Compiles a mapping of typed triggers to expansion text into a set of flat,
//! 16-bit indexed tables that a keyboard firmware can walk without allocating:
//! a BFS-ordered node table, one separate-chaining hash table per inner node,
//! and a null-separated string pool.
//!
//! # Architecture
//!
//! A compilation is a single pass through these components:
//! - [`mapping`]: loading, validation and normalization of the input mapping
//! - [`trie`]: arena-backed prefix tree and breadth-first indexing
//! - [`tables`]: hash tables, string pool and the final [`tables::TrieBundle`]
//! - [`compiler`]: the facade that drives the stages in order
//! - [`emit`]: C and JSON renderings of a bundle

pub mod compiler;
pub mod config;
pub mod emit;
pub mod error;
pub mod mapping;
pub mod tables;
pub mod trie;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Expando.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
