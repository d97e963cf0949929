//! Dynamic value representation for TOON data.
//!
//! [`ToonValue`] is the value tree every encode/decode pass is built
//! around: null, bool, number, string, array, and insertion-ordered object.
//! It's useful for working with TOON data whose shape isn't known at
//! compile time.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{ToonValue, Number};
//!
//! let null = ToonValue::Null;
//! let boolean = ToonValue::from(true);
//! let number = ToonValue::from(42);
//! let text = ToonValue::from("hello");
//!
//! use toon_codec::toon;
//! let obj = toon!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! ```
//!
//! ```rust
//! use toon_codec::ToonValue;
//!
//! let value = ToonValue::from(42);
//! assert!(value.is_number());
//! assert!(!value.is_string());
//! ```
//!
//! ```rust
//! use toon_codec::{to_value, ToonValue};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let point = Point { x: 10, y: 20 };
//! let value: ToonValue = to_value(&point).unwrap();
//!
//! if let ToonValue::Object(obj) = value {
//!     assert_eq!(obj.len(), 2);
//! }
//! ```

use crate::ToonMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed TOON value.
///
/// This is the six-node value tree the whole codec is built on: every
/// decode produces one of these, and every encode consumes one (built
/// directly, via [`crate::to_value`], or via the [`crate::toon!`] macro).
///
/// # Examples
///
/// ```rust
/// use toon_codec::{ToonValue, Number};
///
/// let null = ToonValue::Null;
/// let num = ToonValue::Number(Number::Integer(42));
/// let text = ToonValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ToonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ToonValue>),
    Object(ToonMap),
}

/// A numeric value: either an integer or a float.
///
/// Non-finite floats (`NaN`, `+Infinity`, `-Infinity`) are never retained
/// here past encoding — the encoder maps them to the `null` literal before
/// emission (see [`crate::number`]); the decode grammar has no literal
/// token for them either, so a parsed `Number` is always finite.
///
/// # Examples
///
/// ```rust
/// use toon_codec::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` if this value is `NaN` or infinite. Such a value
    /// should never reach the encoder's output as a number literal.
    #[inline]
    #[must_use]
    pub fn is_non_finite(&self) -> bool {
        matches!(self, Number::Float(f) if !f.is_finite())
    }

    /// Converts to `i64` if this is an integer, or a float with no
    /// fractional part that fits in range.
    ///
    /// ```rust
    /// use toon_codec::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

macro_rules! impl_number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Number::Integer(value as i64)
            }
        })*
    };
}
impl_number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl ToonValue {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, ToonValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, ToonValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, ToonValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, ToonValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, ToonValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, ToonValue::Object(_))
    }

    /// ```rust
    /// use toon_codec::ToonValue;
    ///
    /// assert_eq!(ToonValue::Bool(true).as_bool(), Some(true));
    /// assert_eq!(ToonValue::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ToonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// ```rust
    /// use toon_codec::ToonValue;
    ///
    /// assert_eq!(ToonValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(ToonValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ToonValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ToonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<ToonValue>> {
        match self {
            ToonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ToonMap> {
        match self {
            ToonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl fmt::Display for ToonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToonValue::Null => write!(f, "null"),
            ToonValue::Bool(b) => write!(f, "{}", b),
            ToonValue::Number(n) => write!(f, "{}", n),
            ToonValue::String(s) => write!(f, "{}", s),
            ToonValue::Array(arr) => write!(
                f,
                "[{}]",
                arr.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
            ),
            ToonValue::Object(_) => write!(f, "{{object}}"),
        }
    }
}

impl Serialize for ToonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ToonValue::Null => serializer.serialize_unit(),
            ToonValue::Bool(b) => serializer.serialize_bool(*b),
            ToonValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            ToonValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            ToonValue::String(s) => serializer.serialize_str(s),
            ToonValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            ToonValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ToonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ToonValueVisitor;

        impl<'de> Visitor<'de> for ToonValueVisitor {
            type Value = ToonValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(ToonValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ToonValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(ToonValue::Number(Number::Integer(value as i64)))
                } else {
                    Ok(ToonValue::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(ToonValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ToonValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(ToonValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(ToonValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(ToonValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(ToonValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ToonMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(ToonValue::Object(values))
            }
        }

        deserializer.deserialize_any(ToonValueVisitor)
    }
}

impl TryFrom<ToonValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: ToonValue) -> crate::Result<Self> {
        match value {
            ToonValue::Number(Number::Integer(i)) => Ok(i),
            ToonValue::Number(Number::Float(f)) => {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Ok(f as i64)
                } else {
                    Err(crate::Error::custom(format!("cannot convert float {} to i64", f)))
                }
            }
            _ => Err(crate::Error::custom(format!("expected integer, found {:?}", value))),
        }
    }
}

impl TryFrom<ToonValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: ToonValue) -> crate::Result<Self> {
        match value {
            ToonValue::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!("expected number, found {:?}", value))),
        }
    }
}

impl TryFrom<ToonValue> for bool {
    type Error = crate::Error;

    fn try_from(value: ToonValue) -> crate::Result<Self> {
        match value {
            ToonValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!("expected bool, found {:?}", value))),
        }
    }
}

impl TryFrom<ToonValue> for String {
    type Error = crate::Error;

    fn try_from(value: ToonValue) -> crate::Result<Self> {
        match value {
            ToonValue::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!("expected string, found {:?}", value))),
        }
    }
}

impl From<bool> for ToonValue {
    fn from(value: bool) -> Self {
        ToonValue::Bool(value)
    }
}

macro_rules! impl_toonvalue_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for ToonValue {
            fn from(value: $t) -> Self {
                ToonValue::Number(Number::Integer(value as i64))
            }
        })*
    };
}
impl_toonvalue_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for ToonValue {
    fn from(value: f32) -> Self {
        ToonValue::Number(Number::Float(value as f64))
    }
}

impl From<f64> for ToonValue {
    fn from(value: f64) -> Self {
        ToonValue::Number(Number::Float(value))
    }
}

impl From<String> for ToonValue {
    fn from(value: String) -> Self {
        ToonValue::String(value)
    }
}

impl From<&str> for ToonValue {
    fn from(value: &str) -> Self {
        ToonValue::String(value.to_string())
    }
}

impl From<Vec<ToonValue>> for ToonValue {
    fn from(value: Vec<ToonValue>) -> Self {
        ToonValue::Array(value)
    }
}

impl From<ToonMap> for ToonValue {
    fn from(value: ToonMap) -> Self {
        ToonValue::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn tryfrom_i64() {
        let value = ToonValue::Number(Number::Integer(42));
        assert_eq!(i64::try_from(value).unwrap(), 42);

        let value = ToonValue::Number(Number::Float(42.0));
        assert_eq!(i64::try_from(value).unwrap(), 42);

        let value = ToonValue::String("test".to_string());
        assert!(i64::try_from(value).is_err());
    }

    #[test]
    fn tryfrom_f64() {
        let value = ToonValue::Number(Number::Float(3.5));
        assert_eq!(f64::try_from(value).unwrap(), 3.5);

        let value = ToonValue::Number(Number::Integer(42));
        assert_eq!(f64::try_from(value).unwrap(), 42.0);
    }

    #[test]
    fn tryfrom_bool() {
        let value = ToonValue::Bool(true);
        assert!(bool::try_from(value).unwrap());

        let value = ToonValue::Number(Number::Integer(1));
        assert!(bool::try_from(value).is_err());
    }

    #[test]
    fn tryfrom_string() {
        let value = ToonValue::String("hello".to_string());
        assert_eq!(String::try_from(value).unwrap(), "hello");

        let value = ToonValue::Number(Number::Integer(42));
        assert!(String::try_from(value).is_err());
    }

    #[test]
    fn from_primitives() {
        assert_eq!(ToonValue::from(true), ToonValue::Bool(true));
        assert_eq!(ToonValue::from(42i32), ToonValue::Number(Number::Integer(42)));
        assert_eq!(ToonValue::from(3.5f64), ToonValue::Number(Number::Float(3.5)));
        assert_eq!(ToonValue::from("test"), ToonValue::String("test".to_string()));
    }

    #[test]
    fn from_collections() {
        let vec = vec![ToonValue::from(1i32), ToonValue::from(2i32)];
        let value = ToonValue::from(vec.clone());
        assert_eq!(value, ToonValue::Array(vec));

        let mut map = ToonMap::new();
        map.insert("key".to_string(), ToonValue::from(42i32));
        let value = ToonValue::from(map.clone());
        assert_eq!(value, ToonValue::Object(map));
    }

    #[test]
    fn non_finite_float_is_flagged() {
        assert!(Number::Float(f64::NAN).is_non_finite());
        assert!(Number::Float(f64::INFINITY).is_non_finite());
        assert!(!Number::Float(1.0).is_non_finite());
        assert!(!Number::Integer(1).is_non_finite());
    }

    #[test]
    fn inline_methods() {
        let num = Number::Integer(42);
        assert!(num.is_integer());
        assert!(!num.is_float());
        assert_eq!(num.as_i64(), Some(42));
        assert_eq!(num.as_f64(), 42.0);

        let value = ToonValue::Number(Number::Integer(42));
        assert!(value.is_number());
        assert!(!value.is_null());
        assert!(!value.is_string());
    }
}
