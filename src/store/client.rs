//! Store client boundary
//!
//! The mapping core talks to a document store only through
//! [`DocumentStore`]. Connection lifecycle, credentials and scaling policy
//! belong to the implementation.

use tracing::{debug, info};

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use crate::document::Document;
use crate::schema::SchemaDescriptor;

/// Parameters for creating a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: String,
    pub partition_key_path: String,
    pub throughput: Option<u32>,
}

impl CollectionSpec {
    /// Collection spec for a registered type
    pub fn for_descriptor(descriptor: &SchemaDescriptor, config: &StoreConfig) -> Self {
        Self {
            name: descriptor.table_name().to_string(),
            partition_key_path: descriptor.partition_key_path().to_string(),
            throughput: Some(config.throughput_for(descriptor.table_name())),
        }
    }
}

/// Document store operations used by the core
pub trait DocumentStore: Send + Sync {
    /// Whether the named collection exists
    fn collection_exists(&self, collection: &str) -> StoreResult<bool>;

    /// Create a collection
    fn create_collection(&self, spec: &CollectionSpec) -> StoreResult<()>;

    /// Insert or replace a document keyed by its `id` and `PK`.
    ///
    /// Returns the stored document including store-managed fields.
    fn upsert(&self, collection: &str, document: Document) -> StoreResult<Document>;

    /// Read a document by id and partition key
    fn read(&self, collection: &str, id: &str, partition_key: &str)
        -> StoreResult<Option<Document>>;
}

/// Ensures the collection for `descriptor` exists.
///
/// Returns `true` if the collection was created by this call. Losing a
/// creation race to another caller counts as already existing.
///
/// # Errors
///
/// `AutoCreateDisabled` if the collection is missing and
/// `auto_create_collections` is off.
pub fn ensure_collection(
    store: &dyn DocumentStore,
    descriptor: &SchemaDescriptor,
    config: &StoreConfig,
) -> StoreResult<bool> {
    let table = descriptor.table_name();
    if store.collection_exists(table)? {
        return Ok(false);
    }

    if !config.auto_create_collections {
        return Err(StoreError::AutoCreateDisabled(table.to_string()));
    }

    let spec = CollectionSpec::for_descriptor(descriptor, config);
    match store.create_collection(&spec) {
        Ok(()) => {}
        // Another caller created it between the check and the create
        Err(StoreError::CollectionExists(_)) => {
            debug!(collection = %spec.name, "collection created concurrently");
            return Ok(false);
        }
        Err(e) => return Err(e),
    }

    info!(
        database = %config.database,
        collection = %spec.name,
        partition_key_path = %spec.partition_key_path,
        throughput = ?spec.throughput,
        "collection created"
    );

    Ok(true)
}
