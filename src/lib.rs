//! # toon_codec
//!
//! A Serde-compatible serialization library for the TOON (Token-Oriented Object Notation) format.
//!
//! ## What is TOON?
//!
//! TOON is a compact, human-readable data format designed for efficient communication with
//! Large Language Models. It achieves 30-60% fewer tokens than equivalent JSON by dropping
//! redundant punctuation and compressing homogeneous object arrays into tables, while staying
//! unambiguously convertible back to a JSON-equivalent value tree.
//!
//! ## Key Features
//!
//! - **Token-Efficient**: Minimalist syntax — indentation carries structure instead of braces
//!   and brackets, and most strings go unquoted
//! - **Tabular Arrays**: Homogeneous object arrays serialize as a header plus one row per
//!   element, rather than repeating every field name
//! - **Serde Compatible**: Works with existing Rust types via `#[derive(Serialize, Deserialize)]`
//! - **Configurable**: Delimiter, indent width, strictness, key folding and path expansion are
//!   all controlled through [`ToonOptions`]
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! toon_codec = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let toon_string = to_string(&user).unwrap();
//! // id: 123
//! // name: Alice
//! // active: true
//!
//! let user_back: User = from_str(&toon_string).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Working with Arrays (Tabular Format)
//!
//! Arrays of homogeneous objects automatically serialize as space-efficient tables:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::to_string;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//!     price: f64,
//! }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string(), price: 9.99 },
//!     Product { id: 2, name: "Gadget".to_string(), price: 14.99 },
//! ];
//!
//! let toon = to_string(&products).unwrap();
//! // [2]{id,name,price}:
//! //   1,Widget,9.99
//! //   2,Gadget,14.99
//! ```
//!
//! ### Dynamic Values with the `toon!` Macro
//!
//! ```rust
//! use toon_codec::{toon, ToonValue};
//!
//! let data = toon!({
//!     "name": "Alice",
//!     "age": 30
//! });
//!
//! if let ToonValue::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Format Specification
//!
//! See [`spec`] for a description of the on-the-wire grammar this crate implements.

pub mod decoder;
pub mod de;
pub mod encoder;
pub mod error;
pub mod format;
pub mod keypath;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod number;
pub mod options;
pub mod quote;
pub mod ser;
pub mod spec;
pub mod splitter;
pub mod value;
pub mod writer;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::ToonMap;
pub use options::{Delimiter, KeyFolding, ToonOptions};
pub use ser::{Serializer, ToonValueSerializer};
pub use value::{Number, ToonValue};

use serde::{Deserialize, Serialize};
use std::io;

/// Serializes any `T: Serialize` to a TOON string, using [`ToonOptions::default`].
///
/// # Examples
///
/// ```rust
/// use toon_codec::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let toon = to_string(&point).unwrap();
/// assert_eq!(toon, "x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g. a struct
/// serializing the same field name twice) or if `options` is invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &ToonOptions::default())
}

/// Alias of [`to_string`].
///
/// TOON's indentation is always significant, so there is no separate
/// "compact" mode to contrast with — this exists for callers migrating from
/// formats (like JSON) that distinguish pretty from compact output.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string(value)
}

/// Serializes any `T: Serialize` to a TOON string under `options`.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_string_with_options, ToonOptions, Delimiter};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
/// let toon = to_string_with_options(&point, &options).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented or `options` is invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &ToonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    ser::to_string(value, options)
}

/// Converts any `T: Serialize` to a [`ToonValue`] tree.
///
/// Useful for working with TOON data dynamically when the structure isn't known at compile time.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_value, ToonValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let value: ToonValue = to_value(&point).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<ToonValue>
where
    T: ?Sized + Serialize,
{
    ser::to_toon_value(value)
}

/// Serializes any `T: Serialize` to a writer, using [`ToonOptions::default`].
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &ToonOptions::default())
}

/// Serializes any `T: Serialize` to a writer under `options`.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &ToonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let toon_string = to_string_with_options(value, options)?;
    writer.write_all(toon_string.as_bytes()).map_err(Error::from)?;
    Ok(())
}

/// Deserializes an instance of `T` from a string of TOON text, using [`ToonOptions::default`].
///
/// # Examples
///
/// ```rust
/// use toon_codec::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let toon = "x: 1\ny: 2\n";
/// let point: Point = from_str(toon).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON, or cannot be deserialized
/// to type `T`. Parse errors include line and column information.
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_str_with_options(s, &ToonOptions::default())
}

/// Deserializes an instance of `T` from a string of TOON text under `options`.
///
/// # Errors
///
/// Returns an error if the input is not valid TOON, or cannot be deserialized
/// to type `T`.
pub fn from_str_with_options<'a, T>(s: &'a str, options: &ToonOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s, options)?;
    T::deserialize(&mut deserializer)
}

/// Deserializes an instance of `T` from an I/O stream of TOON text.
///
/// # Examples
///
/// ```rust
/// use toon_codec::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let toon_bytes = b"x: 1\ny: 2\n";
/// let cursor = Cursor::new(toon_bytes);
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// TOON, or the data cannot be deserialized to type `T`.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader.read_to_string(&mut string).map_err(Error::from)?;
    from_str(&string)
}

/// Deserializes an instance of `T` from bytes of TOON text.
///
/// # Examples
///
/// ```rust
/// use toon_codec::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let toon_bytes = b"x: 1\ny: 2\n";
/// let point: Point = from_slice(toon_bytes).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOON, or
/// cannot be deserialized to type `T`.
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Encodes a [`ToonValue`] tree directly to TOON text, bypassing serde.
///
/// # Errors
///
/// Returns an error if `options` is invalid.
pub fn encode(value: &ToonValue, options: &ToonOptions) -> Result<String> {
    encoder::encode(value, options)
}

/// Decodes TOON text directly to a [`ToonValue`] tree, bypassing serde.
///
/// # Errors
///
/// Returns an error if the input is not valid TOON.
pub fn decode(input: &str, options: &ToonOptions) -> Result<ToonValue> {
    decoder::decode(input, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn round_trips_a_struct() {
        let point = Point { x: 1, y: 2 };
        let toon = to_string(&point).unwrap();
        let point_back: Point = from_str(&toon).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn round_trips_a_struct_with_a_vec_field() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let toon = to_string(&user).unwrap();
        let user_back: User = from_str(&toon).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn to_string_pretty_matches_to_string() {
        let point = Point { x: 1, y: 2 };
        assert_eq!(to_string_pretty(&point).unwrap(), to_string(&point).unwrap());
    }

    #[test]
    fn to_value_produces_an_object() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            ToonValue::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&ToonValue::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&ToonValue::Number(Number::Integer(2))));
            }
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn round_trips_a_bare_array() {
        let numbers = vec![1, 2, 3, 4, 5];
        let toon = to_string(&numbers).unwrap();
        let numbers_back: Vec<i32> = from_str(&toon).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn round_trips_with_custom_options() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
        let toon = to_string_with_options(&user, &options).unwrap();
        let user_back: User = from_str_with_options(&toon, &options).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn round_trips_through_a_writer_and_reader() {
        let point = Point { x: 1, y: 2 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        let point_back: Point = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn from_slice_rejects_invalid_utf8() {
        let invalid = [0xff, 0xfe, 0xfd];
        let result: Result<Point> = from_slice(&invalid);
        assert!(result.is_err());
    }
}
