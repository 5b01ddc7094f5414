//! Identifier resolution for aerograph
//!
//! Turns the external identifiers (xids) used in mutations into the 64-bit
//! node uids the storage engine works with.
//!
//! # Design Principles
//!
//! - Pure: no I/O, no shared mutable state
//! - Deterministic: an xid always resolves to the same uid
//! - uid 0 is never produced from a numeric xid
//! - Batch bindings are read-only to this crate

mod bindings;
mod resolver;

pub use bindings::{lookup_or_resolve, BindingMap, UidLookup};
pub use resolver::{fingerprint, parse_uid, resolve};
