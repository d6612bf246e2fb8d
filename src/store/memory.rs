//! In-memory document store
//!
//! Reference [`DocumentStore`] used by tests and the CLI. Stamps the
//! store-managed fields on every write the way a hosted document store does.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use super::client::{CollectionSpec, DocumentStore};
use super::errors::{StoreError, StoreResult};
use crate::document::Document;
use crate::schema::{ATTACHMENTS_KEY, ETAG_KEY, ID_KEY, RID_KEY, SELF_KEY, TIMESTAMP_KEY};

#[derive(Debug)]
struct MemoryCollection {
    spec: CollectionSpec,
    /// (id, partition key) -> document
    documents: HashMap<(String, String), Document>,
    next_rid: u64,
}

/// Thread-safe in-memory document store
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    database: String,
    collections: RwLock<HashMap<String, MemoryCollection>>,
}

impl InMemoryDocumentStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Spec the collection was created with
    pub fn collection_spec(&self, collection: &str) -> StoreResult<Option<CollectionSpec>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))?;
        Ok(collections.get(collection).map(|c| c.spec.clone()))
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> StoreResult<usize> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))?;
        collections
            .get(collection)
            .map(|c| c.documents.len())
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn collection_exists(&self, collection: &str) -> StoreResult<bool> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))?;
        Ok(collections.contains_key(collection))
    }

    fn create_collection(&self, spec: &CollectionSpec) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))?;

        if collections.contains_key(&spec.name) {
            return Err(StoreError::CollectionExists(spec.name.clone()));
        }

        collections.insert(
            spec.name.clone(),
            MemoryCollection {
                spec: spec.clone(),
                documents: HashMap::new(),
                next_rid: 1,
            },
        );
        Ok(())
    }

    fn upsert(&self, collection: &str, mut document: Document) -> StoreResult<Document> {
        let id = document
            .id()
            .ok_or(StoreError::MissingKey(ID_KEY))?
            .to_string();
        let partition_key = document.partition_key().unwrap_or_default().to_string();

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))?;
        let coll = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;

        let key = (id, partition_key);

        // Replacement keeps the resource id of the existing document
        let rid = match coll
            .documents
            .get(&key)
            .and_then(|existing| existing.get(RID_KEY))
            .and_then(Value::as_str)
        {
            Some(rid) => rid.to_string(),
            None => {
                let rid = format!("{:016x}", coll.next_rid);
                coll.next_rid += 1;
                rid
            }
        };

        document.insert(ETAG_KEY, Value::String(format!("\"{}\"", Uuid::new_v4())));
        document.insert(
            SELF_KEY,
            Value::String(format!(
                "dbs/{}/colls/{}/docs/{}",
                self.database, collection, rid
            )),
        );
        document.insert(RID_KEY, Value::String(rid));
        document.insert(ATTACHMENTS_KEY, Value::String("attachments/".to_string()));
        document.insert(TIMESTAMP_KEY, Value::from(chrono::Utc::now().timestamp()));

        coll.documents.insert(key, document.clone());
        Ok(document)
    }

    fn read(
        &self,
        collection: &str,
        id: &str,
        partition_key: &str,
    ) -> StoreResult<Option<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))?;
        let coll = collections
            .get(collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;

        Ok(coll
            .documents
            .get(&(id.to_string(), partition_key.to_string()))
            .cloned())
    }
}
