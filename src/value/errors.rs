//! Value conversion errors
//!
//! Error codes:
//! - AERO_VALUE_CANT_CONVERT: no conversion path between two kinds
//! - AERO_VALUE_MALFORMED: bytes are not a valid encoding of the kind

use thiserror::Error;

use super::types::TypeId;

/// Result type for value operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors raised while converting values to or from canonical bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// No conversion exists between the two kinds
    #[error("cannot convert {from} to {to}")]
    CantConvert {
        /// Kind of the source value
        from: TypeId,
        /// Requested target kind
        to: TypeId,
    },

    /// Bytes or payload are not a valid representation of the kind
    #[error("malformed {type_id} value: {reason}")]
    Malformed {
        /// Kind being decoded or encoded
        type_id: TypeId,
        /// What was wrong with it
        reason: String,
    },
}

impl ValueError {
    /// Create a conversion error
    pub fn cant_convert(from: TypeId, to: TypeId) -> Self {
        ValueError::CantConvert { from, to }
    }

    /// Create a malformed value error
    pub fn malformed(type_id: TypeId, reason: impl Into<String>) -> Self {
        ValueError::Malformed {
            type_id,
            reason: reason.into(),
        }
    }

    /// The offending kind
    pub fn type_id(&self) -> TypeId {
        match self {
            ValueError::CantConvert { from, .. } => *from,
            ValueError::Malformed { type_id, .. } => *type_id,
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValueError::CantConvert { .. } => "AERO_VALUE_CANT_CONVERT",
            ValueError::Malformed { .. } => "AERO_VALUE_MALFORMED",
        }
    }
}
