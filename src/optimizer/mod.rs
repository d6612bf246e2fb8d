//! Optimizer subsystem for docpack
//!
//! Registration of record types and the two mapping operations:
//! - `to_document`: record -> `{id, PK, searchable..., p}`
//! - `from_document`: document -> record, or a soft-failure default
//!
//! # Concurrency
//!
//! - One-time construction of the process-wide instance is gated
//! - Lookups and mapping are read-only against the registry
//! - `configure_types` appends under a write lock after validating outside it

mod errors;
mod mapping;
mod optimizer;
mod registry;

pub use errors::{MapResult, MapperError};
pub use mapping::{
    compose_identifier, compose_partition_key, decode, decompose_identifier,
    decompose_partition_key, encode, pack_record, unpack_fields, Decoded,
};
pub use optimizer::Optimizer;
pub use registry::TypeRegistry;
