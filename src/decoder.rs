//! Value parser (spec.md §4.9): turns a lexed line stream into a
//! [`ToonValue`] tree by recursive descent.
//!
//! The root is dispatched to one of three shapes: a bare scalar line, an
//! object (consecutive `key: value` lines), or a root-level array header.
//! Objects and the three array bodies (inline / tabular / expanded) each
//! get their own parse routine, mirroring spec.md's component breakdown.

use crate::error::{Error, Result};
use crate::keypath::{expand_fields, DecodedField};
use crate::lexer::{scan_lines, Line};
use crate::map::ToonMap;
use crate::options::{Delimiter, ToonOptions};
use crate::splitter::{self, Field};
use crate::value::{Number, ToonValue};

/// Parses `input` into a [`ToonValue`] under `options`.
pub fn decode(input: &str, options: &ToonOptions) -> Result<ToonValue> {
    options.validate()?;
    let lines = scan_lines(input, options.indent_size)?;
    let mut parser = Parser {
        lines,
        pos: 0,
        options: options.clone(),
    };
    parser.parse_root()
}

struct Parser {
    lines: Vec<Line>,
    pos: usize,
    options: ToonOptions,
}

impl Parser {
    fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    fn skip_blank(&mut self) {
        while matches!(self.peek(), Some(l) if l.is_blank) {
            self.pos += 1;
        }
    }

    /// Blank lines inside an array body are a strict-mode error and a
    /// tolerated skip otherwise.
    fn skip_blank_in_array(&mut self) -> Result<()> {
        while let Some(line) = self.peek() {
            if !line.is_blank {
                break;
            }
            if self.options.strict {
                return Err(Error::validation(
                    line.number,
                    1,
                    "blank lines are not allowed inside an array body in strict mode",
                ));
            }
            self.pos += 1;
        }
        Ok(())
    }

    fn parse_root(&mut self) -> Result<ToonValue> {
        self.skip_blank();
        let Some(line) = self.peek().cloned() else {
            return Ok(ToonValue::Null);
        };
        if line.indent != 0 {
            return Err(Error::parsing(
                line.number,
                1,
                "unexpected indentation at document root",
            ));
        }
        if line.content.starts_with('[') {
            self.pos += 1;
            return self.parse_array_from_header(&line.content, 0, line.number, self.options.delimiter);
        }
        if try_read_key(&line.content).is_some() {
            return Ok(ToonValue::Object(self.parse_object_fields(0, self.options.delimiter)?));
        }
        self.pos += 1;
        self.skip_blank();
        if let Some(extra) = self.peek() {
            return Err(Error::parsing(
                extra.number,
                1,
                "unexpected content after root scalar value",
            ));
        }
        parse_scalar_token(line.content.trim(), line.number)
    }

    fn parse_object_fields(&mut self, indent: usize, default_delim: Delimiter) -> Result<ToonMap> {
        let mut fields = Vec::new();
        let mut last_line = 1;
        loop {
            self.skip_blank();
            let Some(line) = self.peek().cloned() else { break };
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(Error::parsing(line.number, 1, "unexpected indentation"));
            }
            last_line = line.number;
            let (key, quoted, value) = self.parse_field(default_delim)?;
            fields.push(DecodedField { key, quoted, value });
        }
        expand_fields(fields, &self.options, last_line)
    }

    fn parse_field(&mut self, default_delim: Delimiter) -> Result<(String, bool, ToonValue)> {
        let line = self.peek().cloned().expect("caller verified a line is present");
        let (key, quoted, consumed) = try_read_key(&line.content)
            .ok_or_else(|| Error::parsing(line.number, 1, "expected a key"))?;
        let rest = &line.content[consumed..];
        self.pos += 1;

        if rest.starts_with('[') {
            let value = self.parse_array_from_header(rest, line.indent, line.number, default_delim)?;
            return Ok((key, quoted, value));
        }
        if let Some(after_colon) = rest.strip_prefix(':') {
            let trimmed = after_colon.trim_start_matches(' ');
            if trimmed.is_empty() {
                if let Some(next) = self.peek() {
                    if next.indent > line.indent {
                        let value = ToonValue::Object(self.parse_object_fields(line.indent + 1, default_delim)?);
                        return Ok((key, quoted, value));
                    }
                }
                return Ok((key, quoted, ToonValue::Null));
            }
            let value = parse_scalar_token(trimmed, line.number)?;
            return Ok((key, quoted, value));
        }
        Err(Error::parsing(line.number, consumed + 1, "expected ':' or '[' after key"))
    }

    /// Parses an array header (`rest` starts with `[`) and its body. The
    /// header's own line has already been consumed by the caller.
    fn parse_array_from_header(
        &mut self,
        rest: &str,
        header_indent: usize,
        header_line: usize,
        default_delim: Delimiter,
    ) -> Result<ToonValue> {
        let header = parse_header(rest, header_line)?;
        let delim = header.delimiter.unwrap_or(default_delim);
        let trailing = rest[header.consumed..].trim_start_matches(' ').to_string();

        if let Some(fields) = header.fields {
            self.parse_tabular_body(header.length, &fields, header_indent, header_line, delim)
        } else if !trailing.is_empty() {
            self.parse_inline_body(header.length, &trailing, header_line, delim)
        } else if header.length == 0 {
            Ok(ToonValue::Array(Vec::new()))
        } else {
            self.parse_expanded_body(header.length, header_indent, header_line)
        }
    }

    fn parse_inline_body(
        &mut self,
        length: usize,
        trailing: &str,
        header_line: usize,
        delim: Delimiter,
    ) -> Result<ToonValue> {
        let split = splitter::split_fields(trailing, delim, header_line)?;
        if split.len() != length && self.options.strict {
            return Err(Error::validation(
                header_line,
                1,
                format!("array declared length {} but found {} elements", length, split.len()),
            ));
        }
        let elements = split
            .into_iter()
            .map(|f| field_to_scalar(&f, header_line))
            .collect::<Result<Vec<_>>>()?;
        Ok(ToonValue::Array(elements))
    }

    fn parse_tabular_body(
        &mut self,
        length: usize,
        fields: &[(String, bool)],
        header_indent: usize,
        header_line: usize,
        delim: Delimiter,
    ) -> Result<ToonValue> {
        let mut rows = Vec::with_capacity(length);
        loop {
            if rows.len() >= length {
                break;
            }
            self.skip_blank_in_array()?;
            let Some(row_line) = self.peek().cloned() else { break };
            if row_line.indent != header_indent + 1 {
                break;
            }
            self.pos += 1;
            let split = splitter::split_fields(&row_line.content, delim, row_line.number)?;
            if split.len() != fields.len() {
                return Err(Error::validation(
                    row_line.number,
                    1,
                    format!("expected {} columns, found {}", fields.len(), split.len()),
                ));
            }
            let mut row_fields = Vec::with_capacity(fields.len());
            for ((name, quoted), value_field) in fields.iter().zip(split.into_iter()) {
                let value = field_to_scalar(&value_field, row_line.number)?;
                row_fields.push(DecodedField {
                    key: name.clone(),
                    quoted: *quoted,
                    value,
                });
            }
            let row = expand_fields(row_fields, &self.options, row_line.number)?;
            rows.push(ToonValue::Object(row));
        }
        if rows.len() != length && self.options.strict {
            return Err(Error::validation(
                header_line,
                1,
                format!("array declared length {} but found {} rows", length, rows.len()),
            ));
        }
        Ok(ToonValue::Array(rows))
    }

    fn parse_expanded_body(
        &mut self,
        length: usize,
        header_indent: usize,
        header_line: usize,
    ) -> Result<ToonValue> {
        let elem_indent = header_indent + 1;
        let mut elements = Vec::with_capacity(length);
        loop {
            self.skip_blank_in_array()?;
            let Some(line) = self.peek().cloned() else { break };
            if line.indent != elem_indent || !line.content.starts_with('-') {
                break;
            }
            elements.push(self.parse_expanded_element(elem_indent)?);
        }
        if elements.len() != length && self.options.strict {
            return Err(Error::validation(
                header_line,
                1,
                format!("array declared length {} but found {} elements", length, elements.len()),
            ));
        }
        Ok(ToonValue::Array(elements))
    }

    fn parse_expanded_element(&mut self, elem_indent: usize) -> Result<ToonValue> {
        let line = self.peek().cloned().expect("caller verified dash line");
        let after_dash = strip_dash_prefix(&line.content);
        self.pos += 1;

        if after_dash.trim().is_empty() {
            if let Some(next) = self.peek() {
                if next.indent > elem_indent {
                    return Ok(ToonValue::Object(self.parse_object_fields(elem_indent + 1, Delimiter::Comma)?));
                }
            }
            return Ok(ToonValue::Null);
        }

        if after_dash.starts_with('[') {
            return self.parse_array_from_header(after_dash, elem_indent, line.number, Delimiter::Comma);
        }

        if let Some((key, quoted, consumed)) = try_read_key(after_dash) {
            let rest = &after_dash[consumed..];
            let first_value = if rest.starts_with('[') {
                self.parse_array_from_header(rest, elem_indent, line.number, Delimiter::Comma)?
            } else if let Some(after_colon) = rest.strip_prefix(':') {
                let trimmed = after_colon.trim_start_matches(' ');
                if trimmed.is_empty() {
                    match self.peek() {
                        Some(next) if next.indent > elem_indent + 1 || (next.indent == elem_indent + 2) => {
                            ToonValue::Object(self.parse_object_fields(elem_indent + 2, Delimiter::Comma)?)
                        }
                        _ => ToonValue::Null,
                    }
                } else {
                    parse_scalar_token(trimmed, line.number)?
                }
            } else {
                return Err(Error::parsing(line.number, 1, "expected ':' or '[' after key in array element"));
            };

            let mut fields = vec![DecodedField {
                key,
                quoted,
                value: first_value,
            }];
            loop {
                self.skip_blank_in_array()?;
                let Some(next) = self.peek().cloned() else { break };
                if next.indent != elem_indent + 1 || next.content.starts_with('-') {
                    break;
                }
                let (k, q, v) = self.parse_field(Delimiter::Comma)?;
                fields.push(DecodedField { key: k, quoted: q, value: v });
            }
            let map = expand_fields(fields, &self.options, line.number)?;
            Ok(ToonValue::Object(map))
        } else {
            parse_scalar_token(after_dash.trim(), line.number)
        }
    }
}

fn strip_dash_prefix(content: &str) -> &str {
    if let Some(rest) = content.strip_prefix("- ") {
        rest
    } else {
        content.strip_prefix('-').unwrap_or(content)
    }
}

fn field_to_scalar(field: &Field, line: usize) -> Result<ToonValue> {
    if field.quoted {
        Ok(ToonValue::String(field.text.clone()))
    } else {
        parse_scalar_token(&field.text, line)
    }
}

struct Header {
    length: usize,
    delimiter: Option<Delimiter>,
    fields: Option<Vec<(String, bool)>>,
    /// Byte offset into the original `rest` string right after the header's
    /// trailing `:`.
    consumed: usize,
}

fn parse_header(rest: &str, line: usize) -> Result<Header> {
    let chars: Vec<char> = rest.chars().collect();
    if chars.first() != Some(&'[') {
        return Err(Error::parsing(line, 1, "expected '[' to start an array header"));
    }
    let mut i = 1;
    let digits_start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return Err(Error::parsing(line, i + 1, "expected a digit in array length"));
    }
    let length: usize = chars[digits_start..i]
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| Error::parsing(line, i + 1, "array length is not a valid number"))?;

    let mut delimiter = None;
    if chars.get(i) != Some(&']') {
        let marker = *chars.get(i).ok_or_else(|| Error::parsing(line, i + 1, "unterminated array header"))?;
        delimiter = Delimiter::from_char(marker)
            .ok_or_else(|| Error::parsing(line, i + 1, format!("unrecognized delimiter marker '{}'", marker)))
            .map(Some)?;
        i += 1;
    }
    if chars.get(i) != Some(&']') {
        return Err(Error::parsing(line, i + 1, "expected ']' to close array header"));
    }
    i += 1;

    let mut fields = None;
    if chars.get(i) == Some(&'{') {
        let field_delim = delimiter.unwrap_or(Delimiter::Comma);
        let close = chars[i..]
            .iter()
            .position(|&c| c == '}')
            .map(|p| p + i)
            .ok_or_else(|| Error::parsing(line, i + 1, "unterminated field list"))?;
        let field_list: String = chars[i + 1..close].iter().collect();
        let parsed_fields = splitter::split_fields(&field_list, field_delim, line)?;
        fields = Some(
            parsed_fields
                .into_iter()
                .map(|f| (f.text, f.quoted))
                .collect(),
        );
        i = close + 1;
    }

    if chars.get(i) != Some(&':') {
        return Err(Error::parsing(line, i + 1, "expected ':' after array header"));
    }
    i += 1;

    let consumed = char_count_to_byte_offset(rest, i);
    Ok(Header {
        length,
        delimiter,
        fields,
        consumed,
    })
}

/// Finds a leading key token (quoted or unquoted) at the start of
/// `content`, returning `(key, was_quoted, consumed_byte_offset)` — the
/// byte offset immediately after the key, positioned at the `:` or `[`
/// that follows it. Returns `None` if `content` doesn't open with a key.
fn try_read_key(content: &str) -> Option<(String, bool, usize)> {
    if content.starts_with('"') {
        let chars: Vec<char> = content.chars().collect();
        let mut i = 1;
        let mut key = String::new();
        loop {
            let c = *chars.get(i)?;
            if c == '"' {
                i += 1;
                break;
            }
            if c == '\\' {
                i += 1;
                let esc = *chars.get(i)?;
                key.push(match esc {
                    '\\' => '\\',
                    '"' => '"',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    _ => return None,
                });
                i += 1;
            } else {
                key.push(c);
                i += 1;
            }
        }
        match chars.get(i) {
            Some(':') | Some('[') => Some((key, true, char_count_to_byte_offset(content, i))),
            _ => None,
        }
    } else {
        let mut consumed = None;
        for (bi, c) in content.char_indices() {
            if c == ':' || c == '[' {
                consumed = Some(bi);
                break;
            }
        }
        let consumed = consumed?;
        if consumed == 0 {
            return None;
        }
        Some((content[..consumed].to_string(), false, consumed))
    }
}

fn char_count_to_byte_offset(s: &str, char_count: usize) -> usize {
    s.char_indices()
        .nth(char_count)
        .map(|(b, _)| b)
        .unwrap_or(s.len())
}

fn try_parse_number(s: &str) -> Option<Number> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    if bytes[digits_start] == b'0' && i - digits_start > 1 {
        return None;
    }
    let mut is_float = false;
    if i < bytes.len() && bytes[i] == b'.' {
        is_float = true;
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return None;
        }
    }
    if i != bytes.len() {
        return None;
    }
    if is_float {
        s.parse::<f64>().ok().map(Number::Float)
    } else {
        s.parse::<i64>()
            .ok()
            .map(Number::Integer)
            .or_else(|| s.parse::<f64>().ok().map(Number::Float))
    }
}

fn decode_quoted(token: &str, line: usize) -> Result<String> {
    let chars: Vec<char> = token.chars().collect();
    if chars.first() != Some(&'"') {
        return Err(Error::parsing(line, 1, "expected opening quote"));
    }
    let mut i = 1;
    let mut out = String::new();
    loop {
        let c = *chars
            .get(i)
            .ok_or_else(|| Error::parsing(line, i + 1, "unterminated quoted string"))?;
        if c == '"' {
            i += 1;
            break;
        }
        if c == '\\' {
            i += 1;
            let esc = *chars
                .get(i)
                .ok_or_else(|| Error::parsing(line, i + 1, "unterminated escape sequence"))?;
            out.push(match esc {
                '\\' => '\\',
                '"' => '"',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                other => {
                    return Err(Error::parsing(
                        line,
                        i + 1,
                        format!("invalid escape sequence \\{}", other),
                    ))
                }
            });
            i += 1;
        } else {
            out.push(c);
            i += 1;
        }
    }
    if i != chars.len() {
        return Err(Error::parsing(line, i + 1, "unexpected content after closing quote"));
    }
    Ok(out)
}

fn parse_scalar_token(token: &str, line: usize) -> Result<ToonValue> {
    if token.is_empty() {
        return Ok(ToonValue::String(String::new()));
    }
    if token.starts_with('"') {
        return Ok(ToonValue::String(decode_quoted(token, line)?));
    }
    match token {
        "null" => return Ok(ToonValue::Null),
        "true" => return Ok(ToonValue::Bool(true)),
        "false" => return Ok(ToonValue::Bool(false)),
        _ => {}
    }
    if let Some(n) = try_parse_number(token) {
        return Ok(ToonValue::Number(n));
    }
    Ok(ToonValue::String(token.to_string()))
}
