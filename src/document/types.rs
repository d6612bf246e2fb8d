//! Document wire type
//!
//! Layout:
//!
//! ```text
//! {
//!   "id":  "<composed identifier>",
//!   "PK":  "<composed partition key>",
//!   "p":   "<base64 lz4 bincode packed fields>",
//!   "<searchable key>": <value>, ...
//!   "_etag" / "_rid" / "_self" / "_attachments" / "_ts"   (store-managed)
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{json_type_name, CodecError};
use crate::schema::{ETAG_KEY, ID_KEY, PACKED_KEY, PARTITION_KEY, TIMESTAMP_KEY};

/// Flat, store-facing representation of a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// True when the document has no properties at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Composed identifier, if present and a string
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_KEY)
    }

    /// Composed partition key, if present and a string
    pub fn partition_key(&self) -> Option<&str> {
        self.get_str(PARTITION_KEY)
    }

    /// Packed blob, if present and a string
    pub fn packed(&self) -> Option<&str> {
        self.get_str(PACKED_KEY)
    }

    /// Store version marker
    pub fn etag(&self) -> Option<&str> {
        self.get_str(ETAG_KEY)
    }

    /// Store last-modified time in unix seconds
    pub fn timestamp(&self) -> Option<i64> {
        self.0.get(TIMESTAMP_KEY).and_then(Value::as_i64)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.0)
    }
}

impl TryFrom<Value> for Document {
    type Error = CodecError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CodecError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }
}
