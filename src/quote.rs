//! String quoting policy (spec.md §4.3).
//!
//! Whether a string must be wrapped in double quotes depends on where it
//! appears (`QuoteContext`) and, for values, the delimiter active at that
//! point in the document. Quoted strings use exactly five escapes:
//! `\\ \" \n \r \t`; anything else is never produced by the encoder and is
//! rejected by the decoder.

use crate::options::Delimiter;

/// Where a string is being written, since the quoting rules differ by
/// position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteContext {
    /// An object field name.
    ObjectKey,
    /// An object field's value, or a top-level scalar.
    ObjectValue,
    /// An element inside an inline or tabular array.
    ArrayElement,
}

const RESERVED_WORDS: [&str; 3] = ["true", "false", "null"];

/// A valid unquoted key segment: starts with a letter or underscore,
/// followed by letters, digits, or underscores.
pub fn is_valid_unquoted_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A valid unquoted object key as it appears on the wire: either a single
/// segment, or — the product of key folding — dot-separated segments that
/// are each individually valid (`ident = [A-Za-z_][A-Za-z0-9_.]*`).
fn is_valid_unquoted_key_path(s: &str) -> bool {
    s.split('.').all(is_valid_unquoted_key)
}

fn looks_like_number(s: &str) -> bool {
    // A string is number-shaped if canonical number-parsing it succeeds;
    // we don't need the canonical *form* here, just whether the grammar
    // plausibly claims the token, so a plain f64 parse (stricter subsets
    // like leading zeros are still numeric for ambiguity purposes) suffices.
    !s.is_empty() && s.parse::<f64>().is_ok()
}

fn has_control_char(s: &str) -> bool {
    s.chars().any(|c| (c as u32) < 0x20)
}

fn contains_structural(s: &str) -> bool {
    s.contains(':')
        || s.contains('"')
        || s.contains('\\')
        || s.contains('[')
        || s.contains(']')
        || s.contains('{')
        || s.contains('}')
}

/// Returns `true` if `s` must be wrapped in double quotes when written in
/// `context`, given the delimiter active at that point (the document
/// delimiter for object values, or the array's active delimiter for array
/// elements).
pub fn needs_quote(s: &str, context: QuoteContext, delimiter: Delimiter) -> bool {
    if s.is_empty() {
        return true;
    }
    if RESERVED_WORDS.contains(&s) {
        return true;
    }
    if looks_like_number(s) {
        return true;
    }
    if s.starts_with(' ') || s.ends_with(' ') || s.starts_with('\t') || s.ends_with('\t') {
        return true;
    }
    if has_control_char(s) {
        return true;
    }
    if contains_structural(s) {
        return true;
    }
    if s.starts_with("- ") || s == "-" {
        return true;
    }
    if s.contains(delimiter.as_char()) {
        return true;
    }
    if context == QuoteContext::ObjectKey && !is_valid_unquoted_key_path(s) {
        return true;
    }
    false
}

/// Writes `s` as a quoted string literal (surrounding quotes included),
/// escaping exactly the five characters TOON defines escapes for.
pub fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}
