//! # Canonical Serialization
//!
//! `CanonicalBytes` is the only input accepted by digest computation. It
//! is produced by serializing a value with RFC 8785 (JSON Canonicalization
//! Scheme) rules via `serde_jcs`: sorted keys, compact separators, and a
//! deterministic number format. Two structurally equal corpora therefore
//! always hash to the same digest, regardless of authoring key order.
//!
//! JSON has no representation for NaN or infinity, and `serde_json` would
//! silently write them as `null`. Values are therefore walked once before
//! serialization and any non-finite float is rejected with
//! `CanonicalizationError::NonFiniteNumber`.

use serde::ser::{self, Serialize, Serializer};
use thiserror::Error;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// The inner `Vec<u8>` is private; `CanonicalBytes::new()` is the only
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::NonFiniteNumber` if the value holds
    /// a NaN or infinite float, and `SerializationFailed` if it cannot be
    /// represented as JSON for any other reason.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        if let Err(FloatCheck::NonFinite(f)) = obj.serialize(FiniteFloats) {
            return Err(CanonicalizationError::NonFiniteNumber(f));
        }
        let value = serde_json::to_value(obj)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Error)]
enum FloatCheck {
    #[error("non-finite number {0}")]
    NonFinite(f64),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for FloatCheck {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        FloatCheck::Custom(msg.to_string())
    }
}

/// Serializer that produces nothing and fails on the first non-finite float.
#[derive(Debug, Clone, Copy)]
struct FiniteFloats;

macro_rules! accept {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(fn $method(self, _: $ty) -> Result<(), FloatCheck> {
            Ok(())
        })*
    };
}

impl Serializer for FiniteFloats {
    type Ok = ();
    type Error = FloatCheck;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    accept!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_unit_struct(&'static str),
    );

    fn serialize_f32(self, v: f32) -> Result<(), FloatCheck> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), FloatCheck> {
        if v.is_finite() {
            Ok(())
        } else {
            Err(FloatCheck::NonFinite(v))
        }
    }

    fn serialize_none(self) -> Result<(), FloatCheck> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), FloatCheck> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), FloatCheck> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<(), FloatCheck> {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), FloatCheck> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), FloatCheck> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, FloatCheck> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, FloatCheck> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self, FloatCheck> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, FloatCheck> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, FloatCheck> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, FloatCheck> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, FloatCheck> {
        Ok(self)
    }
}

macro_rules! compound {
    ($($trait:ident :: $method:ident),* $(,)?) => {
        $(impl ser::$trait for FiniteFloats {
            type Ok = ();
            type Error = FloatCheck;

            fn $method<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FloatCheck> {
                value.serialize(*self)
            }

            fn end(self) -> Result<(), FloatCheck> {
                Ok(())
            }
        })*
    };
}

compound!(
    SerializeSeq::serialize_element,
    SerializeTuple::serialize_element,
    SerializeTupleStruct::serialize_field,
    SerializeTupleVariant::serialize_field,
);

impl ser::SerializeMap for FiniteFloats {
    type Ok = ();
    type Error = FloatCheck;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), FloatCheck> {
        key.serialize(*self)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FloatCheck> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), FloatCheck> {
        Ok(())
    }
}

macro_rules! fields {
    ($($trait:ident),* $(,)?) => {
        $(impl ser::$trait for FiniteFloats {
            type Ok = ();
            type Error = FloatCheck;

            fn serialize_field<T: ?Sized + Serialize>(
                &mut self,
                _key: &'static str,
                value: &T,
            ) -> Result<(), FloatCheck> {
                value.serialize(*self)
            }

            fn end(self) -> Result<(), FloatCheck> {
                Ok(())
            }
        })*
    };
}

fields!(SerializeStruct, SerializeStructVariant);
