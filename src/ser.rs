//! serde `Serialize` support: drives any `T: Serialize` into a [`ToonValue`]
//! tree, then hands that tree to [`crate::encoder`] for text rendering.
//!
//! The tree-building half ([`ToonValueSerializer`] and its seq/map/struct
//! helpers) knows nothing about TOON's text grammar — array format
//! selection, quoting, and delimiters are entirely [`crate::encoder`]'s
//! concern, decided once a whole array's elements are in hand. [`Serializer`]
//! is a thin wrapper around the same tree-building logic that also carries
//! [`ToonOptions`], so [`crate::to_string_with_options`] can go straight
//! from a `T: Serialize` to a rendered string.

use crate::encoder;
use crate::error::{Error, Result};
use crate::map::ToonMap;
use crate::options::ToonOptions;
use crate::value::{Number, ToonValue};
use serde::ser::{self, Serialize};

/// Serializes `value` into a [`ToonValue`] tree.
///
/// This is the `to_value` entry point: no text is produced, so none of
/// [`ToonOptions`] applies here.
pub fn to_toon_value<T: Serialize + ?Sized>(value: &T) -> Result<ToonValue> {
    value.serialize(ToonValueSerializer)
}

/// Serializes `value` to a TOON string under `options`.
pub fn to_string<T: Serialize + ?Sized>(value: &T, options: &ToonOptions) -> Result<String> {
    let tree = to_toon_value(value)?;
    encoder::encode(&tree, options)
}

/// A [`serde::Serializer`] that drives any `T: Serialize` straight to TOON
/// text, via an intermediate [`ToonValue`] tree.
///
/// Direct use (`value.serialize(Serializer::new(options))`) mirrors
/// [`to_string`], and exists so callers already holding a `Serializer` (e.g.
/// through a generic `T: Serializer` bound) can still reach TOON output.
pub struct Serializer {
    options: ToonOptions,
}

impl Serializer {
    pub fn new(options: ToonOptions) -> Self {
        Serializer { options }
    }
}

impl ser::Serializer for Serializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = SerializeSeqThenRender;
    type SerializeTuple = SerializeSeqThenRender;
    type SerializeTupleStruct = SerializeSeqThenRender;
    type SerializeTupleVariant = SerializeTupleVariantThenRender;
    type SerializeMap = SerializeMapThenRender;
    type SerializeStruct = SerializeStructThenRender;
    type SerializeStructVariant = SerializeStructVariantThenRender;

    fn serialize_bool(self, v: bool) -> Result<String> {
        self.render(ToonValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        self.render(ToonValue::from(v))
    }
    fn serialize_i16(self, v: i16) -> Result<String> {
        self.render(ToonValue::from(v))
    }
    fn serialize_i32(self, v: i32) -> Result<String> {
        self.render(ToonValue::from(v))
    }
    fn serialize_i64(self, v: i64) -> Result<String> {
        self.render(ToonValue::from(v))
    }
    fn serialize_u8(self, v: u8) -> Result<String> {
        self.render(ToonValue::from(v))
    }
    fn serialize_u16(self, v: u16) -> Result<String> {
        self.render(ToonValue::from(v))
    }
    fn serialize_u32(self, v: u32) -> Result<String> {
        self.render(ToonValue::from(v))
    }
    fn serialize_u64(self, v: u64) -> Result<String> {
        if v <= i64::MAX as u64 {
            self.render(ToonValue::Number(Number::Integer(v as i64)))
        } else {
            self.render(ToonValue::Number(Number::Float(v as f64)))
        }
    }
    fn serialize_f32(self, v: f32) -> Result<String> {
        self.render(ToonValue::from(v))
    }
    fn serialize_f64(self, v: f64) -> Result<String> {
        self.render(ToonValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<String> {
        self.render(ToonValue::String(v.to_string()))
    }
    fn serialize_str(self, v: &str) -> Result<String> {
        self.render(ToonValue::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<String> {
        let arr = v.iter().map(|b| ToonValue::from(*b)).collect();
        self.render(ToonValue::Array(arr))
    }

    fn serialize_none(self) -> Result<String> {
        self.render(ToonValue::Null)
    }
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        let tree = to_toon_value(value)?;
        self.render(tree)
    }

    fn serialize_unit(self) -> Result<String> {
        self.render(ToonValue::Null)
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        self.render(ToonValue::Null)
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<String> {
        self.render(ToonValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String> {
        let tree = to_toon_value(value)?;
        self.render(tree)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<String> {
        let mut obj = ToonMap::new();
        obj.insert(variant.to_string(), to_toon_value(value)?);
        self.render(ToonValue::Object(obj))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeSeqThenRender> {
        Ok(SerializeSeqThenRender {
            options: self.options,
            elements: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeSeqThenRender> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeSeqThenRender> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariantThenRender> {
        Ok(SerializeTupleVariantThenRender {
            options: self.options,
            variant,
            elements: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMapThenRender> {
        Ok(SerializeMapThenRender {
            options: self.options,
            map: ToonMap::new(),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<SerializeStructThenRender> {
        Ok(SerializeStructThenRender {
            options: self.options,
            map: ToonMap::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariantThenRender> {
        Ok(SerializeStructVariantThenRender {
            options: self.options,
            variant,
            map: ToonMap::new(),
        })
    }
}

impl Serializer {
    fn render(self, value: ToonValue) -> Result<String> {
        encoder::encode(&value, &self.options)
    }
}

pub struct SerializeSeqThenRender {
    options: ToonOptions,
    elements: Vec<ToonValue>,
}

impl ser::SerializeSeq for SerializeSeqThenRender {
    type Ok = String;
    type Error = Error;
    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.elements.push(to_toon_value(value)?);
        Ok(())
    }
    fn end(self) -> Result<String> {
        encoder::encode(&ToonValue::Array(self.elements), &self.options)
    }
}

impl ser::SerializeTuple for SerializeSeqThenRender {
    type Ok = String;
    type Error = Error;
    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }
    fn end(self) -> Result<String> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeSeqThenRender {
    type Ok = String;
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }
    fn end(self) -> Result<String> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariantThenRender {
    options: ToonOptions,
    variant: &'static str,
    elements: Vec<ToonValue>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariantThenRender {
    type Ok = String;
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.elements.push(to_toon_value(value)?);
        Ok(())
    }
    fn end(self) -> Result<String> {
        let mut obj = ToonMap::new();
        obj.insert(self.variant.to_string(), ToonValue::Array(self.elements));
        encoder::encode(&ToonValue::Object(obj), &self.options)
    }
}

pub struct SerializeMapThenRender {
    options: ToonOptions,
    map: ToonMap,
    pending_key: Option<String>,
}

impl ser::SerializeMap for SerializeMapThenRender {
    type Ok = String;
    type Error = Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        let key_value = to_toon_value(key)?;
        let key_text = match key_value {
            ToonValue::String(s) => s,
            other => other.to_string(),
        };
        self.pending_key = Some(key_text);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        if self.map.contains_key(&key) {
            return Err(Error::encoding(format!("duplicate map key `{}`", key)));
        }
        self.map.insert(key, to_toon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<String> {
        encoder::encode(&ToonValue::Object(self.map), &self.options)
    }
}

pub struct SerializeStructThenRender {
    options: ToonOptions,
    map: ToonMap,
}

impl ser::SerializeStruct for SerializeStructThenRender {
    type Ok = String;
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        if self.map.contains_key(key) {
            return Err(Error::encoding(format!("duplicate field `{}`", key)));
        }
        self.map.insert(key.to_string(), to_toon_value(value)?);
        Ok(())
    }
    fn end(self) -> Result<String> {
        encoder::encode(&ToonValue::Object(self.map), &self.options)
    }
}

pub struct SerializeStructVariantThenRender {
    options: ToonOptions,
    variant: &'static str,
    map: ToonMap,
}

impl ser::SerializeStructVariant for SerializeStructVariantThenRender {
    type Ok = String;
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        if self.map.contains_key(key) {
            return Err(Error::encoding(format!("duplicate field `{}`", key)));
        }
        self.map.insert(key.to_string(), to_toon_value(value)?);
        Ok(())
    }
    fn end(self) -> Result<String> {
        let mut outer = ToonMap::new();
        outer.insert(self.variant.to_string(), ToonValue::Object(self.map));
        encoder::encode(&ToonValue::Object(outer), &self.options)
    }
}

/// A [`serde::Serializer`] producing a [`ToonValue`] tree directly, with no
/// text rendering at all. Used by [`crate::to_value`].
#[derive(Clone, Copy)]
pub struct ToonValueSerializer;

impl ser::Serializer for ToonValueSerializer {
    type Ok = ToonValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<ToonValue> {
        Ok(ToonValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }
    fn serialize_i16(self, v: i16) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }
    fn serialize_i32(self, v: i32) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }
    fn serialize_i64(self, v: i64) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }
    fn serialize_u8(self, v: u8) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }
    fn serialize_u16(self, v: u16) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }
    fn serialize_u32(self, v: u32) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }
    fn serialize_u64(self, v: u64) -> Result<ToonValue> {
        if v <= i64::MAX as u64 {
            Ok(ToonValue::Number(Number::Integer(v as i64)))
        } else {
            Ok(ToonValue::Number(Number::Float(v as f64)))
        }
    }
    fn serialize_f32(self, v: f32) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }
    fn serialize_f64(self, v: f64) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<ToonValue> {
        Ok(ToonValue::String(v.to_string()))
    }
    fn serialize_str(self, v: &str) -> Result<ToonValue> {
        Ok(ToonValue::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<ToonValue> {
        Ok(ToonValue::Array(v.iter().map(|b| ToonValue::from(*b)).collect()))
    }

    fn serialize_none(self) -> Result<ToonValue> {
        Ok(ToonValue::Null)
    }
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<ToonValue> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<ToonValue> {
        Ok(ToonValue::Null)
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<ToonValue> {
        Ok(ToonValue::Null)
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<ToonValue> {
        Ok(ToonValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<ToonValue> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<ToonValue> {
        let mut obj = ToonMap::new();
        obj.insert(variant.to_string(), value.serialize(self)?);
        Ok(ToonValue::Object(obj))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            elements: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            elements: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: ToonMap::new(),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: ToonMap::new(),
            pending_key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: ToonMap::new(),
        })
    }
}

pub struct SerializeVec {
    elements: Vec<ToonValue>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = ToonValue;
    type Error = Error;
    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.elements.push(value.serialize(ToonValueSerializer)?);
        Ok(())
    }
    fn end(self) -> Result<ToonValue> {
        Ok(ToonValue::Array(self.elements))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = ToonValue;
    type Error = Error;
    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }
    fn end(self) -> Result<ToonValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = ToonValue;
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }
    fn end(self) -> Result<ToonValue> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    elements: Vec<ToonValue>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = ToonValue;
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.elements.push(value.serialize(ToonValueSerializer)?);
        Ok(())
    }
    fn end(self) -> Result<ToonValue> {
        let mut obj = ToonMap::new();
        obj.insert(self.variant.to_string(), ToonValue::Array(self.elements));
        Ok(ToonValue::Object(obj))
    }
}

pub struct SerializeMap {
    map: ToonMap,
    pending_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = ToonValue;
    type Error = Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        let key_value = key.serialize(ToonValueSerializer)?;
        let key_text = match key_value {
            ToonValue::String(s) => s,
            other => other.to_string(),
        };
        self.pending_key = Some(key_text);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        if self.map.contains_key(&key) {
            return Err(Error::encoding(format!("duplicate map key `{}`", key)));
        }
        self.map.insert(key, value.serialize(ToonValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<ToonValue> {
        Ok(ToonValue::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = ToonValue;
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        if self.map.contains_key(key) {
            return Err(Error::encoding(format!("duplicate field `{}`", key)));
        }
        self.map.insert(key.to_string(), value.serialize(ToonValueSerializer)?);
        Ok(())
    }
    fn end(self) -> Result<ToonValue> {
        Ok(ToonValue::Object(self.map))
    }
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: ToonMap,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = ToonValue;
    type Error = Error;
    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        if self.map.contains_key(key) {
            return Err(Error::encoding(format!("duplicate field `{}`", key)));
        }
        self.map.insert(key.to_string(), value.serialize(ToonValueSerializer)?);
        Ok(())
    }
    fn end(self) -> Result<ToonValue> {
        let mut outer = ToonMap::new();
        outer.insert(self.variant.to_string(), ToonValue::Object(self.map));
        Ok(ToonValue::Object(outer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ToonOptions;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    enum Shape {
        Circle { radius: f64 },
        Unit,
        Wrapped(i32),
    }

    #[test]
    fn serializes_struct_to_value() {
        let point = Point { x: 10, y: 20 };
        let value = to_toon_value(&point).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("x").and_then(|v| v.as_i64()), Some(10));
        assert_eq!(obj.get("y").and_then(|v| v.as_i64()), Some(20));
    }

    #[test]
    fn serializes_struct_to_string() {
        let point = Point { x: 10, y: 20 };
        let text = to_string(&point, &ToonOptions::default()).unwrap();
        assert_eq!(text, "x: 10\ny: 20\n");
    }

    #[test]
    fn serializes_struct_variant() {
        let shape = Shape::Circle { radius: 2.5 };
        let value = to_toon_value(&shape).unwrap();
        let outer = value.as_object().unwrap();
        let inner = outer.get("Circle").unwrap().as_object().unwrap();
        match inner.get("radius") {
            Some(ToonValue::Number(n)) => assert_eq!(n.as_f64(), 2.5),
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn serializes_unit_variant_as_string() {
        let value = to_toon_value(&Shape::Unit).unwrap();
        assert_eq!(value, ToonValue::String("Unit".to_string()));
    }

    #[test]
    fn serializes_newtype_variant() {
        let value = to_toon_value(&Shape::Wrapped(7)).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("Wrapped").and_then(|v| v.as_i64()), Some(7));
    }

    #[test]
    fn rejects_duplicate_map_keys() {
        let mut m = SerializeMap {
            map: ToonMap::new(),
            pending_key: None,
        };
        ser::SerializeMap::serialize_key(&mut m, &"dup").unwrap();
        ser::SerializeMap::serialize_value(&mut m, &1i32).unwrap();
        ser::SerializeMap::serialize_key(&mut m, &"dup").unwrap();
        let err = ser::SerializeMap::serialize_value(&mut m, &2i32).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn rejects_duplicate_struct_fields() {
        let mut s = SerializeMap {
            map: ToonMap::new(),
            pending_key: None,
        };
        ser::SerializeStruct::serialize_field(&mut s, "id", &1i32).unwrap();
        let err = ser::SerializeStruct::serialize_field(&mut s, "id", &2i32).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn serializes_option() {
        let some: Option<i32> = Some(5);
        let none: Option<i32> = None;
        assert_eq!(to_toon_value(&some).unwrap(), ToonValue::from(5));
        assert_eq!(to_toon_value(&none).unwrap(), ToonValue::Null);
    }

    #[test]
    fn serializes_vec_to_value() {
        let items = vec![1, 2, 3];
        let value = to_toon_value(&items).unwrap();
        assert_eq!(
            value,
            ToonValue::Array(vec![ToonValue::from(1), ToonValue::from(2), ToonValue::from(3)])
        );
    }
}
