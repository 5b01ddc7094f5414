//! Edge construction
//!
//! Three entry points, from most to least resolution work:
//! - `to_edge`: subject and object xids resolved directly
//! - `to_edge_using`: xids resolved through batch bindings first
//! - `create_edge`: uids supplied by the caller
//!
//! The first two resolve and then delegate to `create_edge`. Construction is
//! all-or-nothing: on error no edge is returned.

use crate::errors::{MutationError, MutationResult};
use crate::uid::{lookup_or_resolve, resolve, UidLookup};
use crate::value::encode;

use super::directed::{DirectedEdge, EdgeValue};
use super::statement::{ObjectKind, Statement};

impl Statement {
    /// Build an edge for a standalone statement.
    ///
    /// Does not consult any batch bindings, so blank nodes are fingerprinted.
    pub fn to_edge(&self) -> MutationResult<DirectedEdge> {
        let subject = resolve(&self.subject)?;
        let object = self.object_uid(resolve)?;
        self.create_edge(subject, object)
    }

    /// Build an edge, resolving xids through `bindings` first.
    pub fn to_edge_using<B>(&self, bindings: &B) -> MutationResult<DirectedEdge>
    where
        B: UidLookup + ?Sized,
    {
        let subject = lookup_or_resolve(&self.subject, bindings)?;
        let object = self.object_uid(|xid| lookup_or_resolve(xid, bindings))?;
        self.create_edge(subject, object)
    }

    /// Build an edge from already-resolved uids.
    ///
    /// `object_uid` is only read for node references.
    pub fn create_edge(&self, subject_uid: u64, object_uid: u64) -> MutationResult<DirectedEdge> {
        let value = match self.classify() {
            ObjectKind::NodeReference => EdgeValue::Uid(object_uid),
            ObjectKind::PlainLiteral | ObjectKind::MultiLanguageLiteral => self.encode_object()?,
            ObjectKind::Absent => return Err(MutationError::missing_object(&self.predicate)),
        };

        Ok(DirectedEdge {
            entity: subject_uid,
            attr: self.predicate.clone(),
            value,
            lang: self.lang.clone(),
            label: self.label.clone(),
            facets: self.facets.clone(),
        })
    }

    /// Resolve the object xid when the object is a node, 0 otherwise.
    pub(crate) fn object_uid<F>(&self, resolve_xid: F) -> MutationResult<u64>
    where
        F: FnOnce(&str) -> MutationResult<u64>,
    {
        match self.classify() {
            ObjectKind::NodeReference => resolve_xid(&self.object_id),
            _ => Ok(0),
        }
    }

    fn encode_object(&self) -> MutationResult<EdgeValue> {
        let value = self
            .object_value
            .as_ref()
            .ok_or_else(|| MutationError::missing_object(&self.predicate))?;
        let encoded = encode(value)?;
        Ok(EdgeValue::Literal {
            bytes: encoded.bytes,
            value_type: self.object_type.unwrap_or(encoded.type_id),
        })
    }
}
