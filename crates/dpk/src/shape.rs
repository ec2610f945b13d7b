//! Top-level shape of an event before it is lowered to JSON.
//!
//! `serde_json` renders non-finite floats as `null`, so a NaN event and a unit
//! event both lower to `Value::Null`. Only the latter is a null event; the
//! former is present and must be hashed. `ShapeSerializer` tells them apart by
//! looking at the value itself.

use serde::ser::{self, Impossible, Serialize, Serializer};
use std::fmt;

/// What a value serializes as at the top level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Unit, `None`, or a unit struct.
    Null,
    /// A NaN or infinite float.
    NonFinite(f64),
    /// Anything else.
    Other,
}

/// Inspects `value` without building any JSON.
pub fn shape_of<T: Serialize + ?Sized>(value: &T) -> Shape {
    value.serialize(ShapeSerializer).unwrap_or(Shape::Other)
}

/// Raised for compound values; they are never null-like.
#[derive(Debug)]
pub struct CompoundValue;

impl fmt::Display for CompoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("compound value")
    }
}

impl std::error::Error for CompoundValue {}

impl ser::Error for CompoundValue {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        CompoundValue
    }
}

struct ShapeSerializer;

macro_rules! other_scalar {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<Shape, CompoundValue> {
                Ok(Shape::Other)
            }
        )*
    };
}

fn float_shape(f: f64) -> Shape {
    if f.is_finite() {
        Shape::Other
    } else {
        Shape::NonFinite(f)
    }
}

impl Serializer for ShapeSerializer {
    type Ok = Shape;
    type Error = CompoundValue;
    type SerializeSeq = Impossible<Shape, CompoundValue>;
    type SerializeTuple = Impossible<Shape, CompoundValue>;
    type SerializeTupleStruct = Impossible<Shape, CompoundValue>;
    type SerializeTupleVariant = Impossible<Shape, CompoundValue>;
    type SerializeMap = Impossible<Shape, CompoundValue>;
    type SerializeStruct = Impossible<Shape, CompoundValue>;
    type SerializeStructVariant = Impossible<Shape, CompoundValue>;

    other_scalar!(
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_char: char,
        serialize_str: &str,
        serialize_bytes: &[u8],
    );

    fn serialize_f32(self, v: f32) -> Result<Shape, CompoundValue> {
        Ok(float_shape(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Shape, CompoundValue> {
        Ok(float_shape(v))
    }

    fn serialize_none(self) -> Result<Shape, CompoundValue> {
        Ok(Shape::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Shape, CompoundValue> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Shape, CompoundValue> {
        Ok(Shape::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Shape, CompoundValue> {
        Ok(Shape::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Shape, CompoundValue> {
        Ok(Shape::Other)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Shape, CompoundValue> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Shape, CompoundValue> {
        Ok(Shape::Other)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, CompoundValue> {
        Err(CompoundValue)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, CompoundValue> {
        Err(CompoundValue)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, CompoundValue> {
        Err(CompoundValue)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, CompoundValue> {
        Err(CompoundValue)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, CompoundValue> {
        Err(CompoundValue)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, CompoundValue> {
        Err(CompoundValue)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, CompoundValue> {
        Err(CompoundValue)
    }
}
