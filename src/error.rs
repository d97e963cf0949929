//! Error types for TOON encoding and decoding.
//!
//! ## Error categories
//!
//! - [`Error::Parsing`] — malformed TOON text (bad token, unterminated
//!   string, invalid escape, invalid number, unexpected end of input).
//! - [`Error::Validation`] — well-formed text that violates a strict-mode
//!   rule (array length mismatch, bad indentation, duplicate key, a blank
//!   line inside an array body, a path-expansion merge conflict).
//! - [`Error::Encoding`] — a value tree (or a type driving the serializer)
//!   that cannot be represented, such as a struct emitting the same field
//!   name twice.
//! - [`Error::Decoding`] — the parsed value tree doesn't match the target
//!   type.
//! - [`Error::Config`] — an invalid [`crate::ToonOptions`] combination.
//! - [`Error::Io`] — failures from the `to_writer`/`from_reader` wrappers.
//!
//! `Parsing` and `Validation` carry 1-based line/column positions whenever
//! the failure has one.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{from_str, ToonValue};
//!
//! let result: Result<ToonValue, _> = from_str("invalid: [malformed");
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error as ThisError;

/// All errors that can occur while encoding or decoding TOON.
#[derive(Debug, Clone, ThisError)]
pub enum Error {
    /// I/O failure while reading or writing.
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed TOON text.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parsing {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed text that violates a strict-mode rule.
    #[error("validation error at line {line}, column {column}: {message}")]
    Validation {
        line: usize,
        column: usize,
        message: String,
    },

    /// A value (or a type driving the serializer) cannot be represented.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The parsed value tree doesn't match the target type.
    #[error("decoding error: expected {expected}, found {found}")]
    Decoding { expected: String, found: String },

    /// An invalid [`crate::ToonOptions`] combination.
    #[error("configuration error: {0}")]
    Config(String),

    /// Free-form error raised through serde's `custom` hook.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn parsing(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Parsing {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn validation(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Validation {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Error::Encoding(message.into())
    }

    pub fn decoding(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::Decoding {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn io(message: impl fmt::Display) -> Self {
        Error::Io(message.to_string())
    }

    /// Free-form error, used by the serializer/deserializer for failures
    /// that don't fit the other categories (e.g. a map key that isn't a
    /// string).
    pub fn custom(message: impl fmt::Display) -> Self {
        Error::Custom(message.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_error_formats_with_position() {
        let err = Error::parsing(3, 7, "unexpected token");
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("column 7"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn encoding_error_carries_message() {
        let err = Error::encoding("duplicate field `id`");
        assert!(err.to_string().contains("duplicate field"));
    }

    #[test]
    fn custom_hook_used_by_serde() {
        let err = <Error as serde::de::Error>::custom("missing field `x`");
        matches!(err, Error::Custom(_));
    }
}
