//! Statement to edge conversion for aerograph
//!
//! Takes parsed mutation statements and produces the directed edges the
//! storage engine writes.
//!
//! # Design Principles
//!
//! - Exactly one object form per edge (uid or literal bytes)
//! - Classification before resolution: literals never resolve object xids
//! - All-or-nothing construction
//! - Errors returned to the caller, never logged and dropped here
//!
//! # Flow
//!
//! ```text
//! Statement -> classify -> resolve subject/object (uid)
//!                       -> encode literal (value)
//!           -> create_edge -> DirectedEdge
//! ```

mod builder;
mod directed;
mod expand;
mod statement;

pub use directed::{DirectedEdge, EdgeValue};
pub use statement::{Facet, ObjectKind, Statement};
