//! Variable expansion
//!
//! A statement whose subject is a query variable becomes one edge per uid the
//! variable is bound to. The object is shared, so it is resolved and encoded
//! once and the edge is stamped out per subject.

use crate::errors::MutationResult;
use crate::uid::{lookup_or_resolve, UidLookup};

use super::directed::DirectedEdge;
use super::statement::Statement;

impl Statement {
    /// Fan the statement out over the uids bound to `subject_var`.
    ///
    /// Edges come back in the order of `subject_uids`. A variable bound to
    /// nothing yields no edges and no error.
    ///
    /// # Panics
    ///
    /// Panics if the statement has no subject variable. Only the executor
    /// calls this, and only after checking for one.
    pub fn expand_subject_var<B>(
        &self,
        subject_uids: &[u64],
        bindings: &B,
    ) -> MutationResult<Vec<DirectedEdge>>
    where
        B: UidLookup + ?Sized,
    {
        assert!(
            !self.subject_var.is_empty(),
            "expand_subject_var called on statement without a subject variable (predicate {:?})",
            self.predicate
        );

        let Some((&first, _)) = subject_uids.split_first() else {
            return Ok(Vec::new());
        };

        let object = self.object_uid(|xid| lookup_or_resolve(xid, bindings))?;
        let template = self.create_edge(first, object)?;

        Ok(subject_uids
            .iter()
            .map(|&uid| DirectedEdge {
                entity: uid,
                ..template.clone()
            })
            .collect())
    }
}
