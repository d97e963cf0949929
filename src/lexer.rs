//! Lexer / line scanner (spec.md §4.8).
//!
//! TOON's grammar is indentation-sensitive and line-oriented, so decoding
//! starts by splitting the document into [`Line`]s: each line's leading
//! spaces become an indent *level* (not a raw column count), and the
//! remaining text is handed to [`crate::decoder`] unexamined. Blank-line
//! significance is context-dependent (spec.md §4.8 leaves it to the
//! caller), so this module only records `is_blank`; the decoder applies
//! the strict/non-strict policy.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based source line number, for error reporting.
    pub number: usize,
    /// Indentation level: `leading_spaces / indent_size`.
    pub indent: usize,
    /// The line's text with leading indentation stripped (not otherwise
    /// trimmed — trailing content is preserved verbatim).
    pub content: String,
    pub is_blank: bool,
}

/// Splits `input` into [`Line`]s, validating indentation against
/// `indent_size`.
///
/// Accepts a trailing `\r` on each line (CRLF tolerance). A literal tab
/// anywhere in a line's indentation prefix, or a leading-space count that
/// isn't a multiple of `indent_size`, is a parse error.
pub fn scan_lines(input: &str, indent_size: usize) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    for (idx, raw) in input.split('\n').enumerate() {
        let number = idx + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);

        let leading_spaces = raw.len() - raw.trim_start_matches(' ').len();
        let rest = &raw[leading_spaces..];

        if rest.starts_with('\t') {
            return Err(Error::parsing(
                number,
                leading_spaces + 1,
                "tab characters are not allowed in indentation",
            ));
        }

        let is_blank = raw.trim().is_empty();
        let indent = if is_blank {
            0
        } else if leading_spaces % indent_size == 0 {
            leading_spaces / indent_size
        } else {
            return Err(Error::parsing(
                number,
                1,
                format!(
                    "indentation of {} spaces is not a multiple of {}",
                    leading_spaces, indent_size
                ),
            ));
        };

        lines.push(Line {
            number,
            indent,
            content: rest.to_string(),
            is_blank,
        });
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_strips_indent() {
        let lines = scan_lines("a: 1\n  b: 2\n", 2).unwrap();
        assert_eq!(lines[0].indent, 0);
        assert_eq!(lines[0].content, "a: 1");
        assert_eq!(lines[1].indent, 1);
        assert_eq!(lines[1].content, "b: 2");
    }

    #[test]
    fn tolerates_crlf() {
        let lines = scan_lines("a: 1\r\nb: 2\r\n", 2).unwrap();
        assert_eq!(lines[0].content, "a: 1");
        assert_eq!(lines[1].content, "b: 2");
    }

    #[test]
    fn records_blank_lines() {
        let lines = scan_lines("a: 1\n\nb: 2\n", 2).unwrap();
        assert!(lines[1].is_blank);
    }

    #[test]
    fn rejects_tab_indentation() {
        let err = scan_lines("a: 1\n\tb: 2\n", 2).unwrap_err();
        assert!(matches!(err, Error::Parsing { .. }));
    }

    #[test]
    fn rejects_indent_not_multiple_of_size() {
        let err = scan_lines("a: 1\n   b: 2\n", 2).unwrap_err();
        assert!(matches!(err, Error::Parsing { .. }));
    }

    #[test]
    fn custom_indent_size() {
        let lines = scan_lines("a:\n    b: 1\n", 4).unwrap();
        assert_eq!(lines[1].indent, 1);
    }
}
