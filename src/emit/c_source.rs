//! C translation unit and header rendering.
//!
//! The generated symbols match the firmware runtime's `trie.h`:
//!
//! * `<prefix>_trie_num_nodes`
//! * `<prefix>_string_pool`
//! * `<prefix>_trie_nodes`
//! * `<prefix>_hash_tables`
//! * `<prefix>_hash_buckets`
//! * `<prefix>_hash_entries`
//! * `<prefix>_get_string()`

use std::fmt::Write;

use tracing::debug;

use super::escape::{char_literal, push_string_literal};
use super::{BundleEmitter, EmitError, EmitResult};
use crate::tables::TrieBundle;

const PREAMBLE: &str = "// Automatically generated file. Do not edit.\n";

/// Renders a bundle as C source.
#[derive(Debug, Clone)]
pub struct CSourceEmitter {
    prefix: String,
}

impl CSourceEmitter {
    /// Creates an emitter naming every symbol `<prefix>_...`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Symbol prefix in use.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn write_string_pool(&self, out: &mut String, bundle: &TrieBundle) -> EmitResult<()> {
        write!(out, "const char {}_string_pool[] =", self.prefix)?;
        if bundle.string_pool.is_empty() {
            out.push_str(" \"\";\n\n");
            return Ok(());
        }

        // One literal per payload; adjacent literals concatenate.
        for payload in bundle.string_pool.split_inclusive(|&b| b == 0) {
            out.push_str("\n    \"");
            push_string_literal(out, payload);
            out.push('"');
        }
        out.push_str(";\n\n");
        Ok(())
    }

    fn write_nodes(&self, out: &mut String, bundle: &TrieBundle) -> EmitResult<()> {
        writeln!(out, "const struct trie_node {}_trie_nodes[] = {{", self.prefix)?;
        for node in &bundle.nodes {
            writeln!(
                out,
                "    {{ .hash_table_index = {}, .expanded_text_offset = {}, .is_terminal = {}, .preserve_trigger = {} }},",
                node.hash_table_index,
                node.payload_offset,
                u8::from(node.is_terminal),
                u8::from(node.preserve_trigger),
            )?;
        }
        out.push_str("};\n\n");
        Ok(())
    }

    fn write_hash_tables(&self, out: &mut String, bundle: &TrieBundle) -> EmitResult<()> {
        writeln!(
            out,
            "const struct trie_hash_table {}_hash_tables[] = {{",
            self.prefix
        )?;
        for table in &bundle.hash_tables {
            writeln!(
                out,
                "    {{ .buckets_start_index = {}, .num_buckets = {} }},",
                table.buckets_start_index, table.bucket_count
            )?;
        }
        out.push_str("};\n\n");
        Ok(())
    }

    fn write_buckets(&self, out: &mut String, bundle: &TrieBundle) -> EmitResult<()> {
        write!(out, "const uint16_t {}_hash_buckets[] = {{", self.prefix)?;
        if !bundle.buckets.is_empty() {
            let heads: Vec<String> = bundle.buckets.iter().map(u16::to_string).collect();
            write!(out, "\n    {}\n", heads.join(", "))?;
        }
        out.push_str("};\n\n");
        Ok(())
    }

    fn write_hash_entries(&self, out: &mut String, bundle: &TrieBundle) -> EmitResult<()> {
        writeln!(
            out,
            "const struct trie_hash_entry {}_hash_entries[] = {{",
            self.prefix
        )?;
        for (index, entry) in bundle.hash_entries.iter().enumerate() {
            if !entry.key.is_ascii() {
                return Err(EmitError::NonAsciiKey {
                    entry: index,
                    key: entry.key,
                });
            }
            writeln!(
                out,
                "    {{ .key = '{}', .child_node_index = {}, .next_entry_index = {} }},",
                char_literal(entry.key as u8),
                entry.child_node_index,
                entry.next_entry_index
            )?;
        }
        out.push_str("};\n\n");
        Ok(())
    }

    fn write_get_string(&self, out: &mut String) -> EmitResult<()> {
        let prefix = &self.prefix;
        writeln!(out, "const char *{prefix}_get_string(uint16_t offset) {{")?;
        writeln!(
            out,
            "    if (offset >= sizeof({prefix}_string_pool)) return NULL;"
        )?;
        writeln!(out, "    return &{prefix}_string_pool[offset];")?;
        out.push_str("}\n");
        Ok(())
    }
}

impl BundleEmitter for CSourceEmitter {
    fn emit(&self, bundle: &TrieBundle) -> EmitResult<String> {
        let mut out = String::new();
        out.push_str(PREAMBLE);
        out.push_str("#include <zmk/trie.h>\n#include <stddef.h>\n\n");
        writeln!(
            out,
            "const uint16_t {}_trie_num_nodes = {};\n",
            self.prefix,
            bundle.node_count()
        )?;

        self.write_string_pool(&mut out, bundle)?;
        self.write_nodes(&mut out, bundle)?;
        self.write_hash_tables(&mut out, bundle)?;
        self.write_buckets(&mut out, bundle)?;
        self.write_hash_entries(&mut out, bundle)?;
        self.write_get_string(&mut out)?;

        debug!(
            prefix = %self.prefix,
            bytes = out.len(),
            "Rendered C source"
        );
        Ok(out)
    }

    fn header(&self, bundle: &TrieBundle) -> EmitResult<Option<String>> {
        let mut out = String::from("#pragma once\n");
        out.push_str(PREAMBLE);
        writeln!(
            out,
            "#define {}_GENERATED_MAX_SHORT_LEN {}",
            self.prefix.to_ascii_uppercase(),
            bundle.max_trigger_length
        )?;
        Ok(Some(out))
    }
}
