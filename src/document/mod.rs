//! Document subsystem for docpack
//!
//! The store-facing side of the mapping:
//! - [`Document`]: flat key-value wire representation
//! - [`keys`]: composition and decomposition of `id` / `PK`
//! - [`packed`]: the compressed `p` blob
//!
//! Nothing here knows about record types; the optimizer reads record fields
//! and hands plain values to these functions.

mod errors;
pub mod keys;
pub mod packed;
mod types;

pub(crate) use errors::json_type_name;
pub use errors::{CodecError, CodecResult};
pub use packed::PackedValue;
pub use types::Document;
