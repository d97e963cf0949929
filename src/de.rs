//! serde `Deserialize` support: parses TOON text once into a [`ToonValue`]
//! tree via [`crate::decoder`], then drives serde's visitor protocol over
//! that tree.
//!
//! Unlike a streaming deserializer, [`Deserializer`] never re-reads source
//! text once constructed — [`Deserializer::from_str`] does all of the
//! parsing (and so is fallible, returning [`Error`] on malformed input up
//! front rather than lazily during visitation).
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use toon_codec::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let toon = "x: 1\ny: 2\n";
//! let data: Data = from_str(toon).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ```rust
//! use toon_codec::from_str;
//!
//! let nums: Vec<i32> = from_str("nums[3]: 1,2,3\n").unwrap();
//! assert_eq!(nums, vec![1, 2, 3]);
//! ```

use crate::error::{Error, Result};
use crate::map::ToonMap;
use crate::options::ToonOptions;
use crate::value::{Number, ToonValue};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// The TOON deserializer.
///
/// Parses TOON text into a [`ToonValue`] tree up front, then drives
/// `Deserialize` implementations over that tree.
pub struct Deserializer {
    value: ToonValue,
}

impl Deserializer {
    /// Parses `input` under `options` and returns a deserializer over the
    /// resulting value tree.
    ///
    /// This is fallible (unlike a streaming deserializer whose constructor
    /// can't fail) because the whole document is parsed immediately rather
    /// than lazily as fields are visited.
    pub fn from_str(input: &str, options: &ToonOptions) -> Result<Self> {
        let value = crate::decoder::decode(input, options)?;
        Ok(Deserializer { value })
    }

    fn take_value(&mut self) -> ToonValue {
        std::mem::take(&mut self.value)
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.take_value()).deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_null() {
            self.take_value();
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.take_value()).deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

/// Drives serde's visitor protocol over one owned [`ToonValue`] node.
///
/// Used both for sequence/map elements (which own their `ToonValue` once
/// taken out of the parent collection) and, via [`Deserializer`], for the
/// document root.
struct ValueDeserializer {
    value: ToonValue,
}

impl ValueDeserializer {
    fn new(value: ToonValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ToonValue::Null => visitor.visit_unit(),
            ToonValue::Bool(b) => visitor.visit_bool(b),
            ToonValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            ToonValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            ToonValue::String(s) => visitor.visit_string(s),
            ToonValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            ToonValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ToonValue::String(s) => visitor.visit_enum(s.into_deserializer()),
            ToonValue::Object(obj) if obj.len() == 1 => {
                let (variant, value) = obj.into_iter().next().expect("len checked above");
                visitor.visit_enum(EnumDeserializer::new(variant, value))
            }
            other => Err(Error::decoding("enum variant", format!("{:?}", other))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<ToonValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<ToonValue>) -> Self {
        SeqDeserializer { iter: vec.into_iter() }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, ToonValue>,
    value: Option<ToonValue>,
}

impl MapDeserializer {
    fn new(map: ToonMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(ToonValue::String(key))).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<ToonValue>,
}

impl EnumDeserializer {
    fn new(variant: String, value: ToonValue) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(ToonValue::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<ToonValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(ToonValue::Null) | None => Ok(()),
            Some(other) => Err(Error::decoding("unit variant", format!("{:?}", other))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::decoding("newtype variant", "nothing")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(ToonValue::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Some(other) => Err(Error::decoding("tuple variant", format!("{:?}", other))),
            None => Err(Error::decoding("tuple variant", "nothing")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(ToonValue::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            Some(other) => Err(Error::decoding("struct variant", format!("{:?}", other))),
            None => Err(Error::decoding("struct variant", "nothing")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Shape {
        Circle { radius: f64 },
        Unit,
        Wrapped(i32),
    }

    fn parse<T: for<'de> Deserialize<'de>>(input: &str) -> T {
        let mut de = Deserializer::from_str(input, &ToonOptions::default()).unwrap();
        T::deserialize(&mut de).unwrap()
    }

    #[test]
    fn deserializes_flat_struct() {
        let point: Point = parse("x: 1\ny: 2\n");
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn deserializes_inline_array() {
        let nums: Vec<i32> = parse("nums[3]: 1,2,3\n");
        assert_eq!(nums, vec![1, 2, 3]);
    }

    #[test]
    fn deserializes_option_some_and_none() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Opt {
            a: Option<i32>,
            b: Option<i32>,
        }
        let value: Opt = parse("a: 1\nb: null\n");
        assert_eq!(value, Opt { a: Some(1), b: None });
    }

    #[test]
    fn deserializes_unit_variant() {
        let shape: Shape = parse("Unit\n");
        assert_eq!(shape, Shape::Unit);
    }

    #[test]
    fn deserializes_struct_variant() {
        let shape: Shape = parse("Circle:\n  radius: 2.5\n");
        assert_eq!(shape, Shape::Circle { radius: 2.5 });
    }

    #[test]
    fn deserializes_newtype_variant() {
        let shape: Shape = parse("Wrapped: 7\n");
        assert_eq!(shape, Shape::Wrapped(7));
    }

    #[test]
    fn malformed_input_is_reported_up_front() {
        let err = Deserializer::from_str("a: [malformed", &ToonOptions::default());
        assert!(err.is_err());
    }
}
