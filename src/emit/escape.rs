//! C literal escaping.
//!
//! Anything outside printable ASCII is written as a three-digit octal escape,
//! so an escape can never swallow a digit that follows it.

use std::fmt::Write;

/// Appends `bytes` to `out` as the body of a C string literal.
pub(crate) fn push_string_literal(out: &mut String, bytes: &[u8]) {
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7E => out.push(char::from(byte)),
            _ => push_octal(out, byte),
        }
    }
}

/// Returns the body of a C character literal for an ASCII `byte`.
pub(crate) fn char_literal(byte: u8) -> String {
    let mut out = String::with_capacity(4);
    match byte {
        b'\\' => out.push_str("\\\\"),
        b'\'' => out.push_str("\\'"),
        0x20..=0x7E => out.push(char::from(byte)),
        _ => push_octal(&mut out, byte),
    }
    out
}

fn push_octal(out: &mut String, byte: u8) {
    // Writing to a String cannot fail.
    let _ = write!(out, "\\{byte:03o}");
}
