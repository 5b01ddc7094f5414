//! Directed edges consumed by the storage write path

use crate::value::TypeId;

use super::statement::Facet;

/// The object end of an edge.
///
/// An edge points at another node or carries a literal, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeValue {
    /// Uid of the object node
    Uid(u64),
    /// Canonical literal bytes and their kind
    Literal {
        /// Canonical bytes
        bytes: Vec<u8>,
        /// Stored kind tag
        value_type: TypeId,
    },
}

/// A subject-predicate-object edge ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedEdge {
    /// Subject uid
    pub entity: u64,
    /// Predicate name
    pub attr: String,
    /// Object
    pub value: EdgeValue,
    /// Language tag, empty if none
    pub lang: String,
    /// Label, empty if none
    pub label: String,
    /// Facets copied from the statement
    pub facets: Vec<Facet>,
}

impl DirectedEdge {
    /// Object uid for node references
    pub fn value_id(&self) -> Option<u64> {
        match self.value {
            EdgeValue::Uid(uid) => Some(uid),
            EdgeValue::Literal { .. } => None,
        }
    }

    /// Literal bytes
    pub fn value_bytes(&self) -> Option<&[u8]> {
        match &self.value {
            EdgeValue::Uid(_) => None,
            EdgeValue::Literal { bytes, .. } => Some(bytes),
        }
    }

    /// Literal kind tag
    pub fn value_type(&self) -> Option<TypeId> {
        match self.value {
            EdgeValue::Uid(_) => None,
            EdgeValue::Literal { value_type, .. } => Some(value_type),
        }
    }

    /// True when the object is a node
    pub fn is_uid_edge(&self) -> bool {
        matches!(self.value, EdgeValue::Uid(_))
    }
}
