//! Store boundary for docpack
//!
//! The mapping core produces and consumes documents; this module is the
//! thin layer that hands them to a document store.
//!
//! # Design Principles
//!
//! - One trait at the boundary, [`DocumentStore`]
//! - Collections are provisioned from the type's descriptor and config
//! - Store-managed fields are stamped by the store, never by the mapper
//! - Configuration is validated before use

mod client;
mod config;
mod container;
mod errors;
mod memory;

pub use client::{ensure_collection, CollectionSpec, DocumentStore};
pub use config::{StoreConfig, MIN_THROUGHPUT, THROUGHPUT_STEP};
pub use container::RecordStore;
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryDocumentStore;
