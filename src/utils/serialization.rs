// Canonical JSON encoding for block payloads
use crate::error::{LedgerError, Result};
use serde::ser::{self, Serialize};
use serde_json::{Map, Value};

/// Convert any serializable payload into a JSON value with sorted object keys.
///
/// NaN and infinite floats are rejected: JSON has no encoding for them and
/// `serde_json` would quietly store `null` instead.
pub fn to_canonical_value<T: Serialize + ?Sized>(data: &T) -> Result<Value> {
    data.serialize(FiniteFloats)
        .map_err(|e| LedgerError::Serialization(format!("Payload is not encodable: {e}")))?;
    let value = serde_json::to_value(data)
        .map_err(|e| LedgerError::Serialization(format!("Payload is not encodable: {e}")))?;
    Ok(sort_keys(value))
}

/// Compact JSON text of a value with object keys sorted at every level.
///
/// Values built through `to_canonical_value` are already sorted; values that
/// arrive through deserialization are re-sorted here so the text never
/// depends on input key order.
pub fn canonical_json(value: &Value) -> String {
    sort_keys(value.clone()).to_string()
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key, sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Walks a value and fails on the first non-finite float
#[derive(Clone, Copy)]
struct FiniteFloats;

type CheckResult = std::result::Result<(), serde_json::Error>;

fn check_float(v: f64) -> CheckResult {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ser::Error::custom(format!("non-finite float {v}")))
    }
}

impl ser::Serializer for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> CheckResult {
        Ok(())
    }
    fn serialize_i8(self, _v: i8) -> CheckResult {
        Ok(())
    }
    fn serialize_i16(self, _v: i16) -> CheckResult {
        Ok(())
    }
    fn serialize_i32(self, _v: i32) -> CheckResult {
        Ok(())
    }
    fn serialize_i64(self, _v: i64) -> CheckResult {
        Ok(())
    }
    fn serialize_i128(self, _v: i128) -> CheckResult {
        Ok(())
    }
    fn serialize_u8(self, _v: u8) -> CheckResult {
        Ok(())
    }
    fn serialize_u16(self, _v: u16) -> CheckResult {
        Ok(())
    }
    fn serialize_u32(self, _v: u32) -> CheckResult {
        Ok(())
    }
    fn serialize_u64(self, _v: u64) -> CheckResult {
        Ok(())
    }
    fn serialize_u128(self, _v: u128) -> CheckResult {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> CheckResult {
        check_float(f64::from(v))
    }
    fn serialize_f64(self, v: f64) -> CheckResult {
        check_float(v)
    }
    fn serialize_char(self, _v: char) -> CheckResult {
        Ok(())
    }
    fn serialize_str(self, _v: &str) -> CheckResult {
        Ok(())
    }
    fn serialize_bytes(self, _v: &[u8]) -> CheckResult {
        Ok(())
    }
    fn serialize_none(self) -> CheckResult {
        Ok(())
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> CheckResult {
        value.serialize(self)
    }
    fn serialize_unit(self) -> CheckResult {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> CheckResult {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> CheckResult {
        Ok(())
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(self)
    }
    fn serialize_seq(self, _len: Option<usize>) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_tuple(self, _len: usize) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_map(self, _len: Option<usize>) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(*self)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(*self)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(*self)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(*self)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> CheckResult {
        key.serialize(*self)
    }
    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(*self)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(*self)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(*self)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}
