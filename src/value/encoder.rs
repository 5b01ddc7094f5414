//! Value encoder
//!
//! Produces the bytes written to storage for a literal object. Geo, date and
//! datetime payloads are canonical already and pass through untouched; every
//! other kind is marshalled to binary.

use super::convert::marshal;
use super::errors::{ValueError, ValueResult};
use super::types::{TypeId, TypedValue};

/// Canonical bytes for a literal plus the kind they were produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedValue {
    /// Canonical bytes
    pub bytes: Vec<u8>,
    /// Kind of the original value
    pub type_id: TypeId,
}

/// Encode a typed value into canonical bytes.
pub fn encode(value: &TypedValue) -> ValueResult<EncodedValue> {
    let type_id = value.type_id();

    let bytes = match value {
        TypedValue::Geo(bytes) | TypedValue::Date(bytes) | TypedValue::DateTime(bytes) => {
            bytes.clone()
        }
        _ => match marshal(value, TypeId::Binary)? {
            TypedValue::Binary(bytes) => bytes,
            other => {
                return Err(ValueError::malformed(
                    type_id,
                    format!("binary conversion produced {}", other.type_id()),
                ))
            }
        },
    };

    Ok(EncodedValue { bytes, type_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::convert::unmarshal;

    #[test]
    fn test_int_encodes_little_endian() {
        let encoded = encode(&TypedValue::Int(30)).unwrap();
        assert_eq!(encoded.type_id, TypeId::Int);
        assert_eq!(encoded.bytes, 30i64.to_le_bytes().to_vec());
    }

    #[test]
    fn test_pre_encoded_kinds_pass_through() {
        let raw = vec![1, 0, 0, 0, 14, 187, 75, 55, 229, 0, 0, 0, 0, 255, 255];
        for v in [
            TypedValue::Geo(raw.clone()),
            TypedValue::Date(raw.clone()),
            TypedValue::DateTime(raw.clone()),
        ] {
            let encoded = encode(&v).unwrap();
            assert_eq!(encoded.bytes, raw);
            assert_eq!(encoded.type_id, v.type_id());
        }
    }

    #[test]
    fn test_pass_through_does_not_validate() {
        // Garbage geo bytes are the parser's problem, not the encoder's.
        let encoded = encode(&TypedValue::DateTime(vec![0xde, 0xad])).unwrap();
        assert_eq!(encoded.bytes, vec![0xde, 0xad]);
    }

    #[test]
    fn test_unset_encodes_as_empty_string() {
        let encoded = encode(&TypedValue::Unset).unwrap();
        assert!(encoded.bytes.is_empty());
        assert_eq!(encoded.type_id, TypeId::String);
    }

    #[test]
    fn test_encode_then_unmarshal_recovers_value() {
        for v in [
            TypedValue::Binary(vec![7, 7, 7]),
            TypedValue::Int(-123456789),
            TypedValue::Float(3.25),
            TypedValue::Bool(true),
            TypedValue::string("bob"),
            TypedValue::untyped("42"),
            TypedValue::Password("correct horse".into()),
        ] {
            let encoded = encode(&v).unwrap();
            assert_eq!(unmarshal(&encoded.bytes, encoded.type_id).unwrap(), v);
        }
    }

    #[test]
    fn test_deterministic_encoding() {
        let v = TypedValue::Float(0.1);
        assert_eq!(encode(&v).unwrap(), encode(&v).unwrap());
    }
}
