//! Mutation conversion errors
//!
//! Error codes:
//! - AERO_INVALID_IDENTIFIER (REJECT)
//! - AERO_VALUE_ENCODING_FAILED (REJECT)
//! - AERO_MISSING_OBJECT (REJECT)
//!
//! AERO_MISSING_OBJECT goes beyond identifier and encoding failures: a
//! statement with neither an object value nor an object identifier is
//! rejected instead of producing an edge with no object.
//!
//! Every error rejects the single statement being converted. Whether the rest
//! of the batch continues is the caller's decision.

use std::fmt;

use crate::value::{TypeId, ValueError};

/// Severity levels for mutation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Statement rejected, batch may continue
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Mutation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationErrorCode {
    /// Numeric identifier resolved to zero
    AeroInvalidIdentifier,
    /// Literal could not be brought into canonical bytes
    AeroValueEncodingFailed,
    /// Statement has neither an object value nor an object identifier
    AeroMissingObject,
}

impl MutationErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            MutationErrorCode::AeroInvalidIdentifier => "AERO_INVALID_IDENTIFIER",
            MutationErrorCode::AeroValueEncodingFailed => "AERO_VALUE_ENCODING_FAILED",
            MutationErrorCode::AeroMissingObject => "AERO_MISSING_OBJECT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for MutationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Mutation error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationError {
    code: MutationErrorCode,
    message: String,
    details: Option<String>,
    type_id: Option<TypeId>,
    source: Option<ValueError>,
}

impl MutationError {
    /// Identifier parsed as the reserved zero uid
    pub fn invalid_identifier(xid: &str) -> Self {
        Self {
            code: MutationErrorCode::AeroInvalidIdentifier,
            message: "identifier must be greater than zero".into(),
            details: Some(format!("xid: {}", xid)),
            type_id: None,
            source: None,
        }
    }

    /// Literal encoding failed
    pub fn encoding(source: ValueError) -> Self {
        Self {
            code: MutationErrorCode::AeroValueEncodingFailed,
            message: source.to_string(),
            details: Some(format!("type: {}", source.type_id())),
            type_id: Some(source.type_id()),
            source: Some(source),
        }
    }

    /// Statement carries no object at all
    pub fn missing_object(predicate: &str) -> Self {
        Self {
            code: MutationErrorCode::AeroMissingObject,
            message: "statement has no object value or object identifier".into(),
            details: Some(format!("predicate: {}", predicate)),
            type_id: None,
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> MutationErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Kind of the value that failed to encode
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for MutationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<ValueError> for MutationError {
    fn from(err: ValueError) -> Self {
        MutationError::encoding(err)
    }
}

/// Result type for mutation operations
pub type MutationResult<T> = Result<T, MutationError>;
