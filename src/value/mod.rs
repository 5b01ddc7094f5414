//! Typed literal values for aerograph
//!
//! Every literal object in a mutation carries exactly one `TypedValue`. Before
//! it reaches storage the value is encoded into canonical bytes, and the kind
//! tag is stored alongside so readers can decode it again.
//!
//! # Design Principles
//!
//! - Closed set of kinds, matched exhaustively
//! - Stable numeric tags and byte layouts
//! - Geo and temporal payloads are canonical on arrival
//! - No coercion between kinds during encoding

mod convert;
mod encoder;
mod errors;
mod temporal;
mod types;

pub use convert::{marshal, unmarshal};
pub use encoder::{encode, EncodedValue};
pub use errors::{ValueError, ValueResult};
pub use temporal::{decode_datetime, encode_date, encode_datetime, TEMPORAL_LEN};
pub use types::{TypeId, TypedValue};
