//! Configuration options for TOON encoding and decoding.
//!
//! This module provides the types used to customize TOON behavior:
//!
//! - [`ToonOptions`]: main configuration struct shared by `encode` and `decode`
//! - [`Delimiter`]: choice of active delimiter for arrays and tables
//! - [`KeyFolding`]: whether single-field object chains fold into dotted keys
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{ToonOptions, Delimiter, to_string_with_options};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//!
//! let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
//! let toon = to_string_with_options(&data, &options).unwrap();
//! ```

use crate::error::{Error, Result};

/// Delimiter choice for TOON arrays and tables.
///
/// - **Comma**: document default, most compact
/// - **Tab**: TSV-like output
/// - **Pipe**: readable markdown-style tables
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The character this delimiter writes between fields/elements.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Encode-time key-folding mode.
///
/// Collapses a chain of single-field objects (`a: { b: { c: 1 } }`) into a
/// single dotted key (`a.b.c: 1`), bounded by [`ToonOptions::flatten_depth`]
/// and only when every segment is a valid unquoted key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum KeyFolding {
    /// Never fold. The default.
    #[default]
    Off,
    /// Fold where safe to do so losslessly.
    Safe,
}

/// Configuration shared by [`crate::encode`] and [`crate::decode`], and by
/// every convenience function built on top of them.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{ToonOptions, Delimiter, KeyFolding};
///
/// let options = ToonOptions::new();
/// assert!(options.strict);
///
/// let options = ToonOptions::new()
///     .with_delimiter(Delimiter::Pipe)
///     .with_indent(4)
///     .with_key_folding(KeyFolding::Safe);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ToonOptions {
    /// Array length mismatches, blank lines inside array bodies, duplicate
    /// keys, and path-expansion merge conflicts are hard errors when `true`.
    pub strict: bool,
    /// Document-level default delimiter.
    pub delimiter: Delimiter,
    /// Spaces per indentation level. Must be in `1..=16`.
    pub indent_size: usize,
    /// Encode-time single-field-chain folding.
    pub key_folding: KeyFolding,
    /// Maximum chain length `key_folding = Safe` may collapse. `None` is
    /// unbounded.
    pub flatten_depth: Option<usize>,
    /// Decode-time inverse of key folding.
    pub path_expansion: bool,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            strict: true,
            delimiter: Delimiter::default(),
            indent_size: 2,
            key_folding: KeyFolding::Off,
            flatten_depth: None,
            path_expansion: false,
        }
    }
}

impl ToonOptions {
    /// Creates default options: strict, comma-delimited, 2-space indent, no
    /// key folding or path expansion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the document-level delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the indentation width, in spaces.
    #[must_use]
    pub fn with_indent(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Sets the encode-time key-folding mode.
    #[must_use]
    pub fn with_key_folding(mut self, key_folding: KeyFolding) -> Self {
        self.key_folding = key_folding;
        self
    }

    /// Bounds how many segments key folding may collapse into one key.
    #[must_use]
    pub fn with_flatten_depth(mut self, depth: Option<usize>) -> Self {
        self.flatten_depth = depth;
        self
    }

    /// Enables decode-time path expansion.
    #[must_use]
    pub fn with_path_expansion(mut self, enabled: bool) -> Self {
        self.path_expansion = enabled;
        self
    }

    /// Rejects option combinations with no defined meaning.
    pub fn validate(&self) -> Result<()> {
        if self.indent_size == 0 || self.indent_size > 16 {
            return Err(Error::Config(format!(
                "indent_size must be in 1..=16, got {}",
                self.indent_size
            )));
        }
        if self.flatten_depth == Some(0) {
            return Err(Error::Config(
                "flatten_depth of 0 would fold nothing; use None to disable folding".into(),
            ));
        }
        Ok(())
    }
}
