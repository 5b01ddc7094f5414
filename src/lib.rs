//! aerograph - Deterministic conversion of graph mutations into storage edges
//!
//! A mutation statement names a subject, a predicate and either another node
//! or a literal. This crate resolves external identifiers to uids, encodes
//! literals into canonical bytes, and emits one `DirectedEdge` per statement
//! (or one per bound uid when the subject is a query variable).
//!
//! Design principles:
//! - Same input, same edge. No clocks, no randomness, no allocation of uids.
//! - Every failure rejects one statement with a coded error.
//! - The core never logs. `EdgePipeline` adds logging and counters on top.

pub mod config;
pub mod edge;
pub mod errors;
pub mod mutation;
pub mod observability;
pub mod pipeline;
pub mod uid;
pub mod value;

pub use config::{ConfigError, MutationConfig};
pub use edge::{DirectedEdge, EdgeValue, Facet, ObjectKind, Statement};
pub use errors::{MutationError, MutationErrorCode, MutationResult};
pub use mutation::Mutation;
pub use pipeline::EdgePipeline;
pub use uid::{lookup_or_resolve, resolve, BindingMap, UidLookup};
pub use value::{encode, EncodedValue, TypeId, TypedValue, ValueError};
