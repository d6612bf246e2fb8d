//! docpack - compact document mapping for typed records
//!
//! Maps application records to flat store documents and back. Key fields
//! compose the document `id` and `PK`, searchable fields stay top-level,
//! and everything else is packed into one compressed `p` blob.
//!
//! Layout:
//! - [`record`]: the `Record` trait implemented by application types
//! - [`schema`]: per-type descriptors and their validation
//! - [`document`]: the document type, key composer, and blob codec
//! - [`optimizer`]: type registry and the mapping operations
//! - [`store`]: the document-store boundary
//! - [`cli`]: the `docpack` command-line tool

pub mod cli;
pub mod document;
pub mod optimizer;
pub mod record;
pub mod schema;
pub mod store;

pub use document::Document;
pub use optimizer::{Decoded, MapResult, MapperError, Optimizer};
pub use record::{FieldError, FieldResult, Record, RecordType};
pub use schema::{KeyType, RecordSchema, SchemaDescriptor, SchemaError};
