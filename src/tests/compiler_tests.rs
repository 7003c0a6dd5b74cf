//! End-to-end scenarios for the trie compiler.
//!
//! These tests pin the exact table layout produced for small mappings so that
//! any change to ordering, hashing or packing shows up as a diff.

use crate::compiler::TrieCompiler;
use crate::mapping::{Diagnostic, MappingDocument, RawExpansion};
use crate::tables::{HashEntry, HashTable, NULL_INDEX};
use crate::tests::test_utils::sample_entries;

/// Test the two-trigger layout node by node.
#[test]
fn test_brb_btw_layout() {
    let report = TrieCompiler::default()
        .compile(vec![
            RawExpansion::new("btw", "by the way"),
            RawExpansion::new("brb", "be right back"),
        ])
        .unwrap();
    let bundle = report.bundle;

    assert!(report.diagnostics.is_empty());
    assert_eq!(bundle.node_count(), 6);

    // root -> b -> {r, t}; r -> b; t -> w
    assert_eq!(
        bundle.hash_tables,
        vec![
            HashTable {
                buckets_start_index: 0,
                bucket_count: 1
            },
            HashTable {
                buckets_start_index: 1,
                bucket_count: 2
            },
            HashTable {
                buckets_start_index: 3,
                bucket_count: 1
            },
            HashTable {
                buckets_start_index: 4,
                bucket_count: 1
            },
        ]
    );
    // 'r' is 114 (bucket 0), 't' is 116 (bucket 0): 't' is prepended ahead of 'r'.
    assert_eq!(bundle.buckets, vec![0, 2, NULL_INDEX, 3, 4]);
    assert_eq!(
        bundle.hash_entries[2],
        HashEntry {
            key: 't',
            child_node_index: 3,
            next_entry_index: 1
        }
    );

    assert_eq!(bundle.string_pool, b"be right back\0by the way\0".to_vec());
    assert_eq!(bundle.nodes[4].payload_offset, 0);
    assert_eq!(bundle.nodes[5].payload_offset, 14);
    assert_eq!(bundle.payload_at(0), Some("be right back"));
    assert_eq!(bundle.payload_at(14), Some("by the way"));
    assert_eq!(bundle.lookup("bt"), None);
    assert_eq!(bundle.max_trigger_length, 3);
}

/// Test that a trigger containing the reset character never reaches the tables.
#[test]
fn test_trigger_with_space_is_dropped() {
    let report = TrieCompiler::default()
        .compile(vec![
            RawExpansion::new("a b", "never"),
            RawExpansion::new("ab", "kept"),
        ])
        .unwrap();

    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::ResetCharacter {
            trigger: "a b".to_string(),
            reset_char: ' ',
        }]
    );
    assert_eq!(report.bundle.node_count(), 3);
    assert_eq!(report.bundle.lookup("ab"), Some("kept"));
    assert_eq!(report.bundle.node_for("a "), None);
}

/// Test the minimal bundle for an empty mapping.
#[test]
fn test_empty_mapping() {
    let bundle = TrieCompiler::default().compile(Vec::new()).unwrap().bundle;

    assert_eq!(bundle.node_count(), 1);
    let root = bundle.nodes[0];
    assert_eq!(root.hash_table_index, NULL_INDEX);
    assert_eq!(root.payload_offset, NULL_INDEX);
    assert!(!root.is_terminal);
    assert!(bundle.hash_tables.is_empty());
    assert!(bundle.buckets.is_empty());
    assert!(bundle.hash_entries.is_empty());
    assert!(bundle.string_pool.is_empty());
    assert_eq!(bundle.max_trigger_length, 0);
}

/// Test that a prefix trigger shares the path and stays terminal.
#[test]
fn test_prefix_triggers() {
    let bundle = TrieCompiler::default()
        .compile(vec![
            RawExpansion::new("th", "the"),
            RawExpansion::new("thx", "thanks"),
        ])
        .unwrap()
        .bundle;

    assert_eq!(bundle.node_count(), 4);
    assert_eq!(bundle.lookup("th"), Some("the"));
    assert_eq!(bundle.lookup("thx"), Some("thanks"));
    assert_eq!(bundle.lookup("t"), None);

    let th = bundle.node(bundle.node_for("th").unwrap()).unwrap();
    assert!(th.is_terminal);
    assert_ne!(th.hash_table_index, NULL_INDEX);
}

/// Test that the last definition of a trigger wins and is reported.
#[test]
fn test_duplicate_trigger_last_wins() {
    let report = TrieCompiler::default()
        .compile(vec![
            RawExpansion::new("ty", "thank you"),
            RawExpansion::new("ty", "thanks"),
        ])
        .unwrap();

    assert_eq!(report.bundle.lookup("ty"), Some("thanks"));
    assert_eq!(report.overridden(), 1);
    assert_eq!(report.bundle.string_pool, b"thanks\0".to_vec());
}

/// Test that codepoint directives reach the pool resolved and commands do not.
#[test]
fn test_directives() {
    let report = TrieCompiler::default()
        .compile(vec![
            RawExpansion::new("deg", "{{u:b0}}"),
            RawExpansion::new("mac", "{{cmd:mac}}done"),
            RawExpansion::new("bad", "{{u:110000}}"),
        ])
        .unwrap();

    assert_eq!(report.bundle.lookup("deg"), Some("°"));
    assert_eq!(report.bundle.lookup("mac"), Some("{{cmd:mac}}done"));
    assert_eq!(report.bundle.node_for("bad"), None);
    assert_eq!(report.skipped(), 1);
}

/// Test that trigger preservation flows from groups and overrides into nodes.
#[test]
fn test_preserve_trigger_from_document() {
    let document = MappingDocument::from_toml_str(
        r#"
[[group]]
preserve_trigger = true

[[group.expansion]]
trigger = "sig"
text = "Best regards"

[[group.expansion]]
trigger = "sig2"
text = "Cheers"
preserve_trigger = false
"#,
    )
    .unwrap();

    let bundle = TrieCompiler::default()
        .compile(document.entries(false))
        .unwrap()
        .bundle;

    let sig = bundle.node(bundle.node_for("sig").unwrap()).unwrap();
    let sig2 = bundle.node(bundle.node_for("sig2").unwrap()).unwrap();
    assert!(sig.preserve_trigger);
    assert!(!sig2.preserve_trigger);
}

/// Test that the sample mapping compiles identically every time.
#[test]
fn test_repeatable_output() {
    let compiler = TrieCompiler::default();
    let first = compiler.compile(sample_entries()).unwrap();
    let mut reversed = sample_entries();
    reversed.reverse();
    let second = compiler.compile(reversed).unwrap();

    assert_eq!(first.bundle, second.bundle);
    assert_eq!(first.bundle.lookup("omw"), Some("on my way"));
}
