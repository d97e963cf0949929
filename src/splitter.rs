//! Delimited-value splitter (spec.md §4.10).
//!
//! Splits the right-hand side of an inline array or one tabular row into
//! its fields, honoring quoted segments (a delimiter inside quotes does not
//! split) and decoding the five defined escapes. Surrounding whitespace is
//! trimmed around unquoted fields: spaces and tabs for comma/pipe
//! delimiters, spaces only when the delimiter itself is tab (it would be
//! ambiguous to trim the very character doing the splitting).

use crate::error::{Error, Result};
use crate::options::Delimiter;

/// One split field: its decoded text, and whether it was written quoted in
/// the source (an unquoted field may still need number/bool/null
/// interpretation by the caller; a quoted one never does).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub text: String,
    pub quoted: bool,
}

/// Splits `line` on `delimiter`, respecting quoted segments.
pub fn split_fields(line: &str, delimiter: Delimiter, at_line: usize) -> Result<Vec<Field>> {
    let delim = delimiter.as_char();
    let mut fields = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    let mut current = String::new();
    let mut current_quoted = false;
    let mut any_quoted_in_field = false;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            any_quoted_in_field = true;
            i += 1;
            loop {
                if i >= chars.len() {
                    return Err(Error::parsing(at_line, i + 1, "unterminated quoted string"));
                }
                let qc = chars[i];
                if qc == '"' {
                    i += 1;
                    break;
                }
                if qc == '\\' {
                    i += 1;
                    if i >= chars.len() {
                        return Err(Error::parsing(at_line, i + 1, "unterminated escape sequence"));
                    }
                    let esc = chars[i];
                    current.push(match esc {
                        '\\' => '\\',
                        '"' => '"',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        other => {
                            return Err(Error::parsing(
                                at_line,
                                i + 1,
                                format!("invalid escape sequence \\{}", other),
                            ))
                        }
                    });
                    i += 1;
                } else {
                    current.push(qc);
                    i += 1;
                }
            }
            current_quoted = true;
        } else if c == delim {
            fields.push(finish_field(
                &current,
                current_quoted,
                any_quoted_in_field,
                delimiter,
            ));
            current = String::new();
            current_quoted = false;
            any_quoted_in_field = false;
            i += 1;
        } else {
            current.push(c);
            i += 1;
        }
    }
    fields.push(finish_field(
        &current,
        current_quoted,
        any_quoted_in_field,
        delimiter,
    ));

    Ok(fields)
}

fn finish_field(raw: &str, ended_quoted: bool, any_quoted: bool, delimiter: Delimiter) -> Field {
    if any_quoted {
        return Field {
            text: raw.to_string(),
            quoted: ended_quoted,
        };
    }
    let trimmed = match delimiter {
        Delimiter::Tab => raw.trim_matches(' '),
        _ => raw.trim_matches(|c: char| c == ' ' || c == '\t'),
    };
    Field {
        text: trimmed.to_string(),
        quoted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn splits_on_comma() {
        let fields = split_fields("1,2,3", Delimiter::Comma, 1).unwrap();
        assert_eq!(texts(&fields), vec!["1", "2", "3"]);
    }

    #[test]
    fn quoted_delimiter_does_not_split() {
        let fields = split_fields("\"a,b\",c", Delimiter::Comma, 1).unwrap();
        assert_eq!(texts(&fields), vec!["a,b", "c"]);
        assert!(fields[0].quoted);
        assert!(!fields[1].quoted);
    }

    #[test]
    fn trims_surrounding_whitespace_for_comma() {
        let fields = split_fields(" a , b ", Delimiter::Comma, 1).unwrap();
        assert_eq!(texts(&fields), vec!["a", "b"]);
    }

    #[test]
    fn tab_delimiter_trims_spaces_only() {
        let fields = split_fields(" a \t b ", Delimiter::Tab, 1).unwrap();
        assert_eq!(texts(&fields), vec!["a", "b"]);
    }

    #[test]
    fn empty_fields_decode_to_empty_string() {
        let fields = split_fields("a,,b", Delimiter::Comma, 1).unwrap();
        assert_eq!(texts(&fields), vec!["a", "", "b"]);
    }

    #[test]
    fn decodes_the_five_escapes() {
        let fields = split_fields(r#""a\\b\"c\n\r\t""#, Delimiter::Comma, 1).unwrap();
        assert_eq!(fields[0].text, "a\\b\"c\n\r\t");
    }

    #[test]
    fn rejects_unknown_escape() {
        let err = split_fields(r#""a\xb""#, Delimiter::Comma, 1).unwrap_err();
        assert!(matches!(err, Error::Parsing { .. }));
    }

    #[test]
    fn rejects_unterminated_quote() {
        let err = split_fields("\"abc", Delimiter::Comma, 1).unwrap_err();
        assert!(matches!(err, Error::Parsing { .. }));
    }
}
