//! Typed value model
//!
//! Supported kinds:
//! - binary: raw bytes
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - datetime / date: canonical temporal bytes (see `temporal`)
//! - string: UTF-8 string
//! - geo: canonical geometry bytes
//! - password: UTF-8 secret
//! - default: untyped literal, stored as text
//!
//! The numeric tags are written next to every literal the storage engine
//! persists. They must never be renumbered.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum TypeId {
    /// Raw bytes
    Binary = 0,
    /// 64-bit signed integer
    Int = 1,
    /// 64-bit floating point
    Float = 2,
    /// Boolean
    Bool = 3,
    /// Date and time of day with zone offset
    DateTime = 4,
    /// UTF-8 string
    String = 5,
    /// Calendar date
    Date = 6,
    /// Geometry
    Geo = 7,
    // 8 is held by node references in storage.
    /// Password
    Password = 9,
    /// Untyped literal
    Default = 10,
}

impl TypeId {
    /// Every kind, in tag order.
    pub const ALL: [TypeId; 10] = [
        TypeId::Binary,
        TypeId::Int,
        TypeId::Float,
        TypeId::Bool,
        TypeId::DateTime,
        TypeId::String,
        TypeId::Date,
        TypeId::Geo,
        TypeId::Password,
        TypeId::Default,
    ];

    /// Convert from the stored tag, returns None for unknown or reserved tags
    pub fn from_u32(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(TypeId::Binary),
            1 => Some(TypeId::Int),
            2 => Some(TypeId::Float),
            3 => Some(TypeId::Bool),
            4 => Some(TypeId::DateTime),
            5 => Some(TypeId::String),
            6 => Some(TypeId::Date),
            7 => Some(TypeId::Geo),
            9 => Some(TypeId::Password),
            10 => Some(TypeId::Default),
            _ => None,
        }
    }

    /// Convert to the stored tag
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Returns the type name used in mutations and error messages
    pub fn name(self) -> &'static str {
        match self {
            TypeId::Binary => "binary",
            TypeId::Int => "int",
            TypeId::Float => "float",
            TypeId::Bool => "bool",
            TypeId::DateTime => "datetime",
            TypeId::String => "string",
            TypeId::Date => "date",
            TypeId::Geo => "geo",
            TypeId::Password => "password",
            TypeId::Default => "default",
        }
    }

    /// Look up a kind by its type name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// True for kinds whose payload is already canonical bytes
    pub fn is_pre_encoded(self) -> bool {
        matches!(self, TypeId::Geo | TypeId::Date | TypeId::DateTime)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A literal value together with its kind.
///
/// Geo, date and datetime payloads arrive as canonical bytes produced by the
/// parser or the client. Wire values with a missing or unknown kind tag
/// deserialize as [`TypedValue::Unset`], whatever their payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    /// Raw bytes
    Binary(Vec<u8>),
    /// 64-bit signed integer
    Int(i64),
    /// UTF-8 string
    String(String),
    /// Boolean
    Bool(bool),
    /// 64-bit floating point
    Float(f64),
    /// Canonical geometry bytes
    Geo(Vec<u8>),
    /// Canonical date bytes
    Date(Vec<u8>),
    /// Canonical datetime bytes
    DateTime(Vec<u8>),
    /// Password text
    Password(String),
    /// Untyped literal text
    Default(String),
    /// Kind tag absent or unrecognized; behaves as an empty string
    #[default]
    Unset,
}

impl TypedValue {
    /// Returns the kind of this value
    pub fn type_id(&self) -> TypeId {
        match self {
            TypedValue::Binary(_) => TypeId::Binary,
            TypedValue::Int(_) => TypeId::Int,
            TypedValue::String(_) => TypeId::String,
            TypedValue::Bool(_) => TypeId::Bool,
            TypedValue::Float(_) => TypeId::Float,
            TypedValue::Geo(_) => TypeId::Geo,
            TypedValue::Date(_) => TypeId::Date,
            TypedValue::DateTime(_) => TypeId::DateTime,
            TypedValue::Password(_) => TypeId::Password,
            TypedValue::Default(_) => TypeId::Default,
            TypedValue::Unset => TypeId::String,
        }
    }

    /// Convenience constructor for string values
    pub fn string(s: impl Into<String>) -> Self {
        TypedValue::String(s.into())
    }

    /// Convenience constructor for untyped literals
    pub fn untyped(s: impl Into<String>) -> Self {
        TypedValue::Default(s.into())
    }
}

/// `{"type": ..., "value": ...}` as it appears on the wire
#[derive(Deserialize)]
struct WireValue {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    value: serde_json::Value,
}

fn payload<T, E>(value: serde_json::Value, type_id: TypeId) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    serde_json::from_value(value)
        .map_err(|e| E::custom(format!("invalid {} value: {}", type_id, e)))
}

impl<'de> Deserialize<'de> for TypedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireValue::deserialize(deserializer)?;
        let Some(type_id) = wire.kind.as_deref().and_then(TypeId::from_name) else {
            return Ok(TypedValue::Unset);
        };

        let value = wire.value;
        Ok(match type_id {
            TypeId::Binary => TypedValue::Binary(payload(value, type_id)?),
            TypeId::Int => TypedValue::Int(payload(value, type_id)?),
            TypeId::Float => TypedValue::Float(payload(value, type_id)?),
            TypeId::Bool => TypedValue::Bool(payload(value, type_id)?),
            TypeId::DateTime => TypedValue::DateTime(payload(value, type_id)?),
            TypeId::String => TypedValue::String(payload(value, type_id)?),
            TypeId::Date => TypedValue::Date(payload(value, type_id)?),
            TypeId::Geo => TypedValue::Geo(payload(value, type_id)?),
            TypeId::Password => TypedValue::Password(payload(value, type_id)?),
            TypeId::Default => TypedValue::Default(payload(value, type_id)?),
        })
    }
}
