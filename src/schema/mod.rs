//! Schema subsystem for docpack
//!
//! Derives one immutable [`SchemaDescriptor`] per record type from the
//! record's declared field-role table.
//!
//! # Design Principles
//!
//! - Explicit field roles, no runtime introspection
//! - Validation at registration, never at request time
//! - A rejected type leaves no trace in the registry
//! - Deterministic derivation

mod descriptor;
mod errors;
mod types;
mod validator;

pub use descriptor::{KeyField, SchemaDescriptor, SearchableField, DEFAULT_PARTITION_KEY_PATH};
pub use errors::{KeyGroup, SchemaError, SchemaResult};
pub use types::{FieldDecl, FieldRole, KeyType, RecordSchema};
pub use validator::{
    is_reserved_key, ATTACHMENTS_KEY, ETAG_KEY, ID_KEY, PACKED_KEY, PARTITION_KEY,
    RESERVED_KEYS, RID_KEY, SELF_KEY, TIMESTAMP_KEY,
};
