// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Unit and property-based tests for the trie compiler.

mod property_tests;

use super::*;
use crate::mapping::NormalizedEntry;
use crate::tables::NULL_INDEX;
use crate::trie::{TableKind, TrieError};

#[test]
fn test_compile_counts_diagnostics() {
    let report = TrieCompiler::default()
        .compile(vec![
            RawExpansion::new("ty", "thank you"),
            RawExpansion::new("a b", "dropped"),
            RawExpansion::new("ty", "thanks"),
        ])
        .unwrap();

    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.overridden(), 1);
    assert_eq!(report.bundle.lookup("ty"), Some("thanks"));
}

#[test]
fn test_nul_payloads_never_reach_the_pool() {
    let report = TrieCompiler::default()
        .compile(vec![
            RawExpansion::new("nul", "ab{{u:0}}cd"),
            RawExpansion::new("raw", "x\0y"),
            RawExpansion::new("ok", "fine"),
        ])
        .unwrap();

    assert_eq!(report.skipped(), 2);
    assert!(report.diagnostics.iter().any(|d| d.trigger() == "nul"));
    assert!(report.diagnostics.iter().any(|d| d.trigger() == "raw"));
    assert_eq!(report.bundle.lookup("nul"), None);
    assert_eq!(report.bundle.lookup("raw"), None);
    assert_eq!(report.bundle.lookup("ok"), Some("fine"));
    assert_eq!(report.bundle.string_pool, b"fine\0".to_vec());
}

#[test]
fn test_from_config_applies_rules() {
    let config = CompilerConfig {
        max_trigger_length: Some(2),
        ..Default::default()
    };
    let compiler = TrieCompiler::from_config(&config).unwrap();
    let report = compiler
        .compile(vec![RawExpansion::new("abc", "x"), RawExpansion::new("ab", "y")])
        .unwrap();

    assert_eq!(report.skipped(), 1);
    assert_eq!(report.bundle.max_trigger_length, 2);
}

#[test]
fn test_from_config_rejects_bad_reset_char() {
    let config = CompilerConfig {
        reset_char: "  ".to_string(),
        ..Default::default()
    };
    assert!(TrieCompiler::from_config(&config).is_err());
}

#[test]
fn test_empty_trigger_makes_root_terminal() {
    let compiler = TrieCompiler::new(NormalizationRules::default());
    let mapping = NormalizedMapping {
        entries: vec![NormalizedEntry {
            trigger: String::new(),
            payload: "root".to_string(),
            preserve_trigger: false,
        }],
        ..Default::default()
    };
    let bundle = compiler.compile_normalized(&mapping).unwrap();

    assert_eq!(bundle.node_count(), 1);
    assert!(bundle.nodes[0].is_terminal);
    assert_eq!(bundle.nodes[0].hash_table_index, NULL_INDEX);
    assert_eq!(bundle.lookup(""), Some("root"));
}

#[test]
fn test_pool_capacity_exceeded() {
    // The third 40000-byte payload starts past the sentinel.
    let payload = "x".repeat(40_000);
    let mapping = NormalizedMapping {
        entries: vec![
            NormalizedEntry {
                trigger: "a".to_string(),
                payload: payload.clone(),
                preserve_trigger: false,
            },
            NormalizedEntry {
                trigger: "b".to_string(),
                payload: payload.clone(),
                preserve_trigger: false,
            },
            NormalizedEntry {
                trigger: "c".to_string(),
                payload,
                preserve_trigger: false,
            },
        ],
        ..Default::default()
    };

    let err = TrieCompiler::default()
        .compile_normalized(&mapping)
        .unwrap_err();
    assert!(matches!(
        err,
        TrieError::CapacityExceeded {
            table: TableKind::StringPool,
            ..
        }
    ));
}
