//! Typed record access over a document store

use std::sync::Arc;

use tracing::debug;

use super::client::{ensure_collection, DocumentStore};
use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use crate::optimizer::{Decoded, Optimizer};
use crate::record::Record;
use crate::schema::SchemaDescriptor;

/// Saves and loads registered records through a [`DocumentStore`].
///
/// Collections are ensured on first use of each type.
pub struct RecordStore<'a> {
    optimizer: &'a Optimizer,
    store: Arc<dyn DocumentStore>,
    config: StoreConfig,
}

impl<'a> RecordStore<'a> {
    pub fn new(optimizer: &'a Optimizer, store: Arc<dyn DocumentStore>, config: StoreConfig) -> Self {
        Self {
            optimizer,
            store,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Writes a record, returning it as stored.
    ///
    /// The returned record carries the store's etag in its version field,
    /// if the type declares one.
    pub fn save<T: Record>(&self, record: &T) -> StoreResult<T> {
        let descriptor = self.optimizer.registered::<T>()?;
        self.prepare(&descriptor)?;

        let document = self.optimizer.to_document(record)?;
        let stored = self.store.upsert(descriptor.table_name(), document)?;

        debug!(
            collection = descriptor.table_name(),
            id = stored.id().unwrap_or_default(),
            "record saved"
        );

        match self.optimizer.from_document::<T>(&stored)? {
            Decoded::Record(saved) => Ok(saved),
            Decoded::Defaulted { cause, .. } => Err(StoreError::Mapper(cause.into())),
        }
    }

    /// Reads a record by its composed identifier and partition key
    pub fn load<T: Record>(&self, id: &str, partition_key: &str) -> StoreResult<Option<T>> {
        let descriptor = self.optimizer.registered::<T>()?;
        self.prepare(&descriptor)?;

        let Some(document) = self.store.read(descriptor.table_name(), id, partition_key)? else {
            return Ok(None);
        };

        Ok(self.optimizer.from_document::<T>(&document)?.record())
    }

    /// Composed `(id, PK)` for a record, as used by [`RecordStore::load`]
    pub fn key_of<T: Record>(&self, record: &T) -> StoreResult<(String, String)> {
        let document = self.optimizer.to_document(record)?;
        Ok((
            document.id().unwrap_or_default().to_string(),
            document.partition_key().unwrap_or_default().to_string(),
        ))
    }

    fn prepare(&self, descriptor: &SchemaDescriptor) -> StoreResult<()> {
        ensure_collection(self.store.as_ref(), descriptor, &self.config)?;
        Ok(())
    }
}
