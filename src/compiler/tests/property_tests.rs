// Copyright (c) 2025 Expando Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Property-based tests for the trie compiler.

use proptest::prelude::*;

use crate::compiler::TrieCompiler;
use crate::mapping::RawExpansion;
use crate::tables::{bucket_count_for, TrieBundle, NULL_INDEX};
use crate::tests::test_utils::{
    directive_mapping_strategy, entries_from, mapping_strategy, trigger_strategy,
};

fn compile(entries: Vec<RawExpansion>) -> TrieBundle {
    TrieCompiler::default().compile(entries).unwrap().bundle
}

// Every reference is either the sentinel or a valid index into its table.
fn check_references(bundle: &TrieBundle) -> Result<(), TestCaseError> {
    for node in &bundle.nodes {
        prop_assert!(
            node.hash_table_index == NULL_INDEX
                || (node.hash_table_index as usize) < bundle.hash_tables.len()
        );
        prop_assert!(
            node.payload_offset == NULL_INDEX
                || (node.payload_offset as usize) < bundle.string_pool.len()
        );
        prop_assert_eq!(node.is_terminal, node.payload_offset != NULL_INDEX);
    }
    for &head in &bundle.buckets {
        prop_assert!(head == NULL_INDEX || (head as usize) < bundle.hash_entries.len());
    }
    for entry in &bundle.hash_entries {
        prop_assert!((entry.child_node_index as usize) < bundle.nodes.len());
        prop_assert!(
            entry.next_entry_index == NULL_INDEX
                || (entry.next_entry_index as usize) < bundle.hash_entries.len()
        );
    }
    for table in &bundle.hash_tables {
        let end = table.buckets_start_index as usize + table.bucket_count as usize;
        prop_assert!(end <= bundle.buckets.len());
    }
    Ok(())
}

proptest! {
    // Property: input order never changes the output
    #[test]
    fn prop_deterministic_under_shuffle(
        (ordered, shuffled) in mapping_strategy(40).prop_flat_map(|mapping| {
            let entries = entries_from(&mapping);
            (Just(entries.clone()), Just(entries).prop_shuffle())
        })
    ) {
        prop_assert_eq!(compile(ordered), compile(shuffled));
    }

    // Property: every trigger resolves to its payload
    #[test]
    fn prop_round_trip(mapping in mapping_strategy(40)) {
        let bundle = compile(entries_from(&mapping));
        for (trigger, payload) in &mapping {
            prop_assert_eq!(bundle.lookup(trigger), Some(payload.as_str()));
        }
        let longest = mapping.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        prop_assert_eq!(bundle.max_trigger_length, longest);
    }

    // Property: strings that are not triggers never resolve
    #[test]
    fn prop_no_false_positives(
        mapping in mapping_strategy(30),
        probes in proptest::collection::vec(trigger_strategy(), 1..20),
    ) {
        let bundle = compile(entries_from(&mapping));
        for probe in probes.iter().filter(|p| !mapping.contains_key(*p)) {
            prop_assert_eq!(bundle.lookup(probe), None);
        }
    }

    // Property: no index or offset points outside its table
    #[test]
    fn prop_sentinel_safety(mapping in mapping_strategy(40)) {
        check_references(&compile(entries_from(&mapping)))?;
    }

    // Property: bucket counts are the smallest fitting power of two
    #[test]
    fn prop_bucket_sizing(mapping in mapping_strategy(40)) {
        let bundle = compile(entries_from(&mapping));
        let mut entries_seen = 0;
        for table in &bundle.hash_tables {
            let start = table.buckets_start_index as usize;
            let mut children = 0;
            for &head in &bundle.buckets[start..start + table.bucket_count as usize] {
                let mut cursor = head;
                while cursor != NULL_INDEX {
                    children += 1;
                    cursor = bundle.hash_entries[cursor as usize].next_entry_index;
                }
            }
            prop_assert!(table.bucket_count.is_power_of_two());
            prop_assert_eq!(table.bucket_count as usize, bucket_count_for(children));
            entries_seen += children;
        }
        prop_assert_eq!(entries_seen, bundle.hash_entries.len());
    }

    // Property: each terminal payload sits null-terminated at its offset
    #[test]
    fn prop_pool_integrity(mapping in mapping_strategy(40)) {
        let bundle = compile(entries_from(&mapping));
        let expected_len: usize = mapping.values().map(|p| p.len() + 1).sum();
        prop_assert_eq!(bundle.string_pool.len(), expected_len);

        for (trigger, payload) in &mapping {
            let index = bundle.node_for(trigger).unwrap();
            let offset = bundle.nodes[index as usize].payload_offset as usize;
            let end = offset + payload.len();
            prop_assert_eq!(&bundle.string_pool[offset..end], payload.as_bytes());
            prop_assert_eq!(bundle.string_pool[end], 0u8);
        }
    }

    // Property: surviving directive payloads resolve intact; dropped ones are reported
    #[test]
    fn prop_directive_payloads(mapping in directive_mapping_strategy(30)) {
        let entries = mapping
            .iter()
            .map(|(trigger, (written, _))| RawExpansion::new(trigger.as_str(), written.as_str()))
            .collect::<Vec<_>>();
        let report = TrieCompiler::default().compile(entries).unwrap();
        let bundle = &report.bundle;

        for (trigger, (_, expected)) in &mapping {
            match expected {
                Some(payload) => {
                    prop_assert_eq!(bundle.lookup(trigger), Some(payload.as_str()));
                }
                None => {
                    prop_assert_eq!(bundle.lookup(trigger), None);
                    prop_assert!(report
                        .diagnostics
                        .iter()
                        .any(|d| d.is_skip() && d.trigger() == trigger.as_str()));
                }
            }
        }

        let dropped = mapping.values().filter(|(_, expected)| expected.is_none()).count();
        prop_assert_eq!(report.skipped(), dropped);

        let expected_len: usize = mapping
            .values()
            .filter_map(|(_, expected)| expected.as_ref())
            .map(|p| p.len() + 1)
            .sum();
        prop_assert_eq!(bundle.string_pool.len(), expected_len);
        check_references(bundle)?;
    }
}
