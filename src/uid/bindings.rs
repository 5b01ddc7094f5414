//! Batch-local identifier bindings
//!
//! Blank nodes and other placeholders minted earlier in the same mutation are
//! handed in as a read-only table. Lookups hit the table first and fall back
//! to `resolve`.
//!
//! The table is filled once by the caller and never written afterwards, so it
//! can be shared across worker threads by reference.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::errors::MutationResult;

use super::resolver::resolve;

/// Read-only view of xid to uid bindings.
pub trait UidLookup {
    /// Exact-match lookup
    fn lookup(&self, xid: &str) -> Option<u64>;
}

impl<S: BuildHasher> UidLookup for HashMap<String, u64, S> {
    fn lookup(&self, xid: &str) -> Option<u64> {
        self.get(xid).copied()
    }
}

impl UidLookup for BTreeMap<String, u64> {
    fn lookup(&self, xid: &str) -> Option<u64> {
        self.get(xid).copied()
    }
}

/// Frozen binding table for one mutation batch.
///
/// Built in one step from pairs; there is no way to insert afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingMap {
    entries: HashMap<String, u64>,
}

impl BindingMap {
    /// A table with no bindings
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from xid/uid pairs. Later pairs win on duplicate xids.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Number of bound xids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `xid` is bound
    pub fn contains(&self, xid: &str) -> bool {
        self.entries.contains_key(xid)
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for BindingMap {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<HashMap<String, u64>> for BindingMap {
    fn from(entries: HashMap<String, u64>) -> Self {
        Self { entries }
    }
}

impl UidLookup for BindingMap {
    fn lookup(&self, xid: &str) -> Option<u64> {
        self.entries.get(xid).copied()
    }
}

/// Resolve through the bindings first, then through `resolve`.
///
/// A bound value is returned as-is, even when `resolve` would disagree.
pub fn lookup_or_resolve<B>(xid: &str, bindings: &B) -> MutationResult<u64>
where
    B: UidLookup + ?Sized,
{
    match bindings.lookup(xid) {
        Some(uid) => Ok(uid),
        None => resolve(xid),
    }
}
