//! Resolution of inline codepoint directives in payload text.
//!
//! `{{u:HEX}}` names a Unicode scalar value by its hexadecimal code (one to
//! six digits) and is replaced by that character. Triple-brace blocks
//! (`{{{...}}}`) are literal text for the runtime and are copied untouched,
//! as are other double-brace commands such as `{{cmd:mac}}`.

use std::borrow::Cow;

const LITERAL_OPEN: &str = "{{{";
const LITERAL_CLOSE: &str = "}}}";
const CODEPOINT_OPEN: &str = "{{u:";
const DIRECTIVE_CLOSE: &str = "}}";
const MAX_HEX_DIGITS: usize = 6;

/// A codepoint directive that does not name a valid character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDirective(pub String);

/// Replaces every codepoint directive in `text` with its character.
///
/// # Returns
///
/// * `Ok(Cow::Borrowed)` - If `text` contains no codepoint directive.
/// * `Ok(Cow::Owned)` - The resolved text.
/// * `Err(InvalidDirective)` - The first directive whose code is not hex, is
///   too long, is not a Unicode scalar value, or is NUL (which would end the
///   payload early in the string pool).
pub fn resolve_codepoints(text: &str) -> Result<Cow<'_, str>, InvalidDirective> {
    if !text.contains(CODEPOINT_OPEN) {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        if tail.starts_with(LITERAL_OPEN) {
            if let Some(close) = tail[LITERAL_OPEN.len()..].find(LITERAL_CLOSE) {
                let end = LITERAL_OPEN.len() + close + LITERAL_CLOSE.len();
                out.push_str(&tail[..end]);
                rest = &tail[end..];
                continue;
            }
        } else if let Some(body) = tail.strip_prefix(CODEPOINT_OPEN) {
            if let Some(close) = body.find(DIRECTIVE_CLOSE) {
                let directive = &tail[..CODEPOINT_OPEN.len() + close + DIRECTIVE_CLOSE.len()];
                let resolved = parse_codepoint(&body[..close])
                    .ok_or_else(|| InvalidDirective(directive.to_string()))?;
                out.push(resolved);
                rest = &tail[directive.len()..];
                continue;
            }
        }

        // Not a directive we resolve; keep the braces and move on.
        out.push_str("{{");
        rest = &tail[2..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

fn parse_codepoint(hex: &str) -> Option<char> {
    if hex.is_empty() || hex.len() > MAX_HEX_DIGITS || !hex.chars().all(|c| c.is_ascii_hexdigit())
    {
        return None;
    }
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .filter(|&c| c != '\0')
}
