//! Conversion between value kinds
//!
//! `marshal` moves a value into one of the storage-facing kinds (binary,
//! string, default, password). `unmarshal` is the inverse of the binary
//! column and is what readers of stored edges use to recover a value.
//!
//! Binary layouts:
//! - int: 8 bytes, little-endian two's complement
//! - float: 8 bytes, little-endian IEEE-754 bits
//! - bool: 1 byte, 0x01 or 0x00
//! - string, default, password: UTF-8 bytes
//! - binary, geo, date, datetime: bytes unchanged

use super::errors::{ValueError, ValueResult};
use super::temporal::format_temporal;
use super::types::{TypeId, TypedValue};

/// Convert `from` into the `to` kind.
pub fn marshal(from: &TypedValue, to: TypeId) -> ValueResult<TypedValue> {
    let from_id = from.type_id();
    let cant = || ValueError::cant_convert(from_id, to);

    match from {
        TypedValue::Binary(bytes) => match to {
            TypeId::Binary => Ok(TypedValue::Binary(bytes.clone())),
            TypeId::String | TypeId::Default => {
                let text = String::from_utf8(bytes.clone()).map_err(|e| {
                    ValueError::malformed(TypeId::Binary, format!("not valid UTF-8: {}", e))
                })?;
                Ok(textual(text, to))
            }
            _ => Err(cant()),
        },
        TypedValue::String(s) | TypedValue::Default(s) => match to {
            TypeId::Binary => Ok(TypedValue::Binary(s.as_bytes().to_vec())),
            TypeId::String | TypeId::Default => Ok(textual(s.clone(), to)),
            _ => Err(cant()),
        },
        TypedValue::Unset => match to {
            TypeId::Binary => Ok(TypedValue::Binary(Vec::new())),
            TypeId::String | TypeId::Default => Ok(textual(String::new(), to)),
            _ => Err(cant()),
        },
        TypedValue::Int(i) => match to {
            TypeId::Binary => Ok(TypedValue::Binary(i.to_le_bytes().to_vec())),
            TypeId::String | TypeId::Default => Ok(textual(i.to_string(), to)),
            _ => Err(cant()),
        },
        TypedValue::Float(f) => match to {
            TypeId::Binary => Ok(TypedValue::Binary(f.to_bits().to_le_bytes().to_vec())),
            TypeId::String | TypeId::Default => Ok(textual(f.to_string(), to)),
            _ => Err(cant()),
        },
        TypedValue::Bool(b) => match to {
            TypeId::Binary => Ok(TypedValue::Binary(vec![u8::from(*b)])),
            TypeId::String | TypeId::Default => Ok(textual(b.to_string(), to)),
            _ => Err(cant()),
        },
        TypedValue::Geo(bytes) => match to {
            TypeId::Binary => Ok(TypedValue::Binary(bytes.clone())),
            _ => Err(cant()),
        },
        TypedValue::Date(bytes) | TypedValue::DateTime(bytes) => match to {
            TypeId::Binary => Ok(TypedValue::Binary(bytes.clone())),
            TypeId::String | TypeId::Default => {
                Ok(textual(format_temporal(bytes, from_id)?, to))
            }
            _ => Err(cant()),
        },
        TypedValue::Password(s) => match to {
            TypeId::Binary => Ok(TypedValue::Binary(s.as_bytes().to_vec())),
            TypeId::String | TypeId::Default => Ok(textual(s.clone(), to)),
            TypeId::Password => Ok(TypedValue::Password(s.clone())),
            _ => Err(cant()),
        },
    }
}

fn textual(text: String, to: TypeId) -> TypedValue {
    if to == TypeId::Default {
        TypedValue::Default(text)
    } else {
        TypedValue::String(text)
    }
}

/// Decode canonical binary bytes as a value of kind `to`.
pub fn unmarshal(data: &[u8], to: TypeId) -> ValueResult<TypedValue> {
    match to {
        TypeId::Binary => Ok(TypedValue::Binary(data.to_vec())),
        TypeId::Int => Ok(TypedValue::Int(i64::from_le_bytes(fixed8(data, to)?))),
        TypeId::Float => Ok(TypedValue::Float(f64::from_bits(u64::from_le_bytes(
            fixed8(data, to)?,
        )))),
        TypeId::Bool => match data {
            [0] => Ok(TypedValue::Bool(false)),
            [1] => Ok(TypedValue::Bool(true)),
            [other] => Err(ValueError::malformed(
                to,
                format!("invalid bool byte 0x{:02x}", other),
            )),
            _ => Err(ValueError::malformed(
                to,
                format!("expected 1 byte, got {}", data.len()),
            )),
        },
        TypeId::String => Ok(TypedValue::String(utf8(data, to)?)),
        TypeId::Default => Ok(TypedValue::Default(utf8(data, to)?)),
        TypeId::Password => Ok(TypedValue::Password(utf8(data, to)?)),
        TypeId::Geo => Ok(TypedValue::Geo(data.to_vec())),
        TypeId::Date => Ok(TypedValue::Date(data.to_vec())),
        TypeId::DateTime => Ok(TypedValue::DateTime(data.to_vec())),
    }
}

fn fixed8(data: &[u8], type_id: TypeId) -> ValueResult<[u8; 8]> {
    data.try_into().map_err(|_| {
        ValueError::malformed(type_id, format!("expected 8 bytes, got {}", data.len()))
    })
}

fn utf8(data: &[u8], type_id: TypeId) -> ValueResult<String> {
    String::from_utf8(data.to_vec())
        .map_err(|e| ValueError::malformed(type_id, format!("not valid UTF-8: {}", e)))
}
