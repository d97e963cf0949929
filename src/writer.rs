//! Low-level TOON text writer.
//!
//! Centralizes indentation, delimiter handling, and quoting so `encoder`
//! never touches a raw `String` directly. Carries a stack of "active
//! delimiters" (spec.md §4.4's nested-array delimiter reset): an array
//! declares its own delimiter in its header, but any array nested inside
//! one of its elements resets back to `COMMA` unless it declares otherwise
//! — pushing/popping this stack as encoding descends keeps that rule local
//! to whichever array is currently being written.

use crate::options::{Delimiter, ToonOptions};
use crate::quote::{needs_quote, write_quoted, QuoteContext};
use crate::value::Number;

pub struct Writer {
    buffer: String,
    pub(crate) options: ToonOptions,
    active_delimiters: Vec<Delimiter>,
    indent_unit: String,
    indent_cache: Vec<String>,
}

impl Writer {
    pub fn new(options: ToonOptions) -> Self {
        let indent_unit = " ".repeat(options.indent_size);
        Writer {
            buffer: String::new(),
            active_delimiters: vec![options.delimiter],
            options,
            indent_unit,
            indent_cache: vec![String::new()],
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn push_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn push_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn write_indent(&mut self, depth: usize) {
        if depth == 0 || self.indent_unit.is_empty() {
            return;
        }
        if depth >= self.indent_cache.len() {
            self.extend_indent_cache(depth);
        }
        self.buffer.push_str(&self.indent_cache[depth]);
    }

    /// Writes the delimiter active for the array currently being written
    /// (top of the active-delimiter stack), not necessarily the document
    /// default.
    pub fn write_active_delimiter(&mut self) {
        self.buffer.push(self.active_delimiter().as_char());
    }

    pub fn write_key(&mut self, key: &str) {
        if needs_quote(key, QuoteContext::ObjectKey, self.options.delimiter) {
            self.write_quoted_string(key);
        } else {
            self.buffer.push_str(key);
        }
    }

    /// Writes `key[length delim?]:` (or `[length delim?]:` with no key),
    /// the INLINE/EXPANDED array header form.
    pub fn write_array_header(&mut self, key: Option<&str>, length: usize, depth: usize) {
        self.write_array_prefix(key, depth);
        self.push_char('[');
        self.write_usize(length);
        self.write_header_delimiter_marker();
        self.push_char(']');
        self.push_char(':');
    }

    /// Writes `key[length delim?]{f1,f2,...}:`, the TABULAR header form.
    pub fn write_table_header(
        &mut self,
        key: Option<&str>,
        length: usize,
        fields: &[String],
        depth: usize,
    ) {
        self.write_array_prefix(key, depth);
        self.push_char('[');
        self.write_usize(length);
        self.write_header_delimiter_marker();
        self.push_char(']');
        self.push_char('{');
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.write_active_delimiter();
            }
            self.write_key(field);
        }
        self.push_char('}');
        self.push_char(':');
    }

    fn write_array_prefix(&mut self, key: Option<&str>, depth: usize) {
        if let Some(k) = key {
            if depth > 0 {
                self.write_indent(depth);
            }
            self.write_key(k);
        }
    }

    fn write_header_delimiter_marker(&mut self) {
        let active = self.active_delimiter();
        if active != Delimiter::Comma {
            self.push_char(active.as_char());
        }
    }

    pub fn needs_quote(&self, s: &str, context: QuoteContext) -> bool {
        let delim = match context {
            QuoteContext::ArrayElement => self.active_delimiter(),
            _ => self.options.delimiter,
        };
        needs_quote(s, context, delim)
    }

    pub fn write_quoted_string(&mut self, s: &str) {
        write_quoted(&mut self.buffer, s);
    }

    pub fn write_number(&mut self, n: &Number) {
        match crate::number::canonical(n) {
            Some(rendered) => self.buffer.push_str(&rendered),
            None => self.buffer.push_str("null"),
        }
    }

    pub fn write_usize(&mut self, value: usize) {
        let mut buf = itoa::Buffer::new();
        self.buffer.push_str(buf.format(value as u64));
    }

    pub fn push_active_delimiter(&mut self, delim: Delimiter) {
        self.active_delimiters.push(delim);
    }

    pub fn pop_active_delimiter(&mut self) {
        if self.active_delimiters.len() > 1 {
            self.active_delimiters.pop();
        }
    }

    pub fn active_delimiter(&self) -> Delimiter {
        *self.active_delimiters.last().unwrap_or(&self.options.delimiter)
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let next = match self.indent_cache.last() {
                Some(prev) => {
                    let mut s = String::with_capacity(prev.len() + self.indent_unit.len());
                    s.push_str(prev);
                    s.push_str(&self.indent_unit);
                    s
                }
                None => String::new(),
            };
            self.indent_cache.push(next);
        }
    }
}
