//! Schema descriptors
//!
//! A [`SchemaDescriptor`] is the immutable storage schema derived once per
//! record type from its [`RecordSchema`]. Mapping operations only read it.

use std::any::TypeId;
use std::collections::HashMap;

use tracing::debug;

use super::errors::{KeyGroup, SchemaError, SchemaResult};
use super::types::{FieldRole, KeyType, RecordSchema};
use super::validator::{check_searchable_keys, check_unique_orders};
use crate::record::RecordType;

/// Default store partition-key path
pub const DEFAULT_PARTITION_KEY_PATH: &str = "/PK";

/// A field contributing to a composed key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyField {
    pub name: String,
    pub order: u32,
    pub key_type: KeyType,
}

/// A field stored as a top-level document key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchableField {
    pub field: String,
    pub document_key: String,
}

/// Derived storage schema for one record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    table_name: String,
    partition_key_path: String,
    identifier_fields: Vec<KeyField>,
    partition_key_fields: Vec<KeyField>,
    searchable_fields: Vec<SearchableField>,
    packed_fields: Vec<String>,
    version_field: Option<String>,
}

impl SchemaDescriptor {
    /// Derives and validates the descriptor for a record type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if:
    /// - two identifier fields share an order index
    /// - two partition-key fields share an order index
    /// - a searchable field uses a reserved document key
    /// - a field is declared with incompatible roles
    pub fn build(record_type: &RecordType) -> SchemaResult<Self> {
        let schema = record_type.schema();
        let descriptor = Self::from_schema(record_type, &schema)?;

        debug!(
            type_name = descriptor.type_name,
            table = %descriptor.table_name,
            identifier_fields = descriptor.identifier_fields.len(),
            partition_key_fields = descriptor.partition_key_fields.len(),
            searchable_fields = descriptor.searchable_fields.len(),
            packed_fields = descriptor.packed_fields.len(),
            "schema descriptor built"
        );

        Ok(descriptor)
    }

    fn from_schema(record_type: &RecordType, schema: &RecordSchema) -> SchemaResult<Self> {
        let type_name = record_type.type_name();
        let mut roles: HashMap<&str, &FieldRole> = HashMap::new();
        let mut identifier_fields = Vec::new();
        let mut partition_key_fields = Vec::new();
        let mut searchable_fields = Vec::new();
        let mut packed_fields = Vec::new();
        let mut version_field: Option<String> = None;

        for decl in schema.fields() {
            let name = decl.name.as_str();

            if let Some(existing) = roles.get(name) {
                if existing.is_key() != decl.role.is_key() {
                    return Err(conflict(name, existing, &decl.role, type_name));
                }
                if !decl.role.is_key() {
                    if **existing == decl.role {
                        continue;
                    }
                    return Err(conflict(name, existing, &decl.role, type_name));
                }
            }

            match &decl.role {
                FieldRole::Identifier { order, key_type } => {
                    push_key_field(
                        &mut identifier_fields,
                        KeyGroup::Identifier,
                        name,
                        *order,
                        *key_type,
                        type_name,
                    )?;
                }
                FieldRole::PartitionKey { order, key_type } => {
                    push_key_field(
                        &mut partition_key_fields,
                        KeyGroup::PartitionKey,
                        name,
                        *order,
                        *key_type,
                        type_name,
                    )?;
                }
                FieldRole::Searchable { document_key } => {
                    searchable_fields.push(SearchableField {
                        field: name.to_string(),
                        document_key: document_key.clone(),
                    });
                }
                FieldRole::Packed => packed_fields.push(name.to_string()),
                FieldRole::Version => {
                    if let Some(first) = &version_field {
                        return Err(SchemaError::DuplicateVersionField {
                            first: first.clone(),
                            second: name.to_string(),
                            type_name: type_name.to_string(),
                        });
                    }
                    version_field = Some(name.to_string());
                }
            }

            roles.entry(name).or_insert(&decl.role);
        }

        check_unique_orders(
            KeyGroup::Identifier,
            identifier_fields.iter().map(|f| (f.name.as_str(), f.order)),
            type_name,
        )?;
        check_unique_orders(
            KeyGroup::PartitionKey,
            partition_key_fields.iter().map(|f| (f.name.as_str(), f.order)),
            type_name,
        )?;
        check_searchable_keys(
            searchable_fields
                .iter()
                .map(|f| (f.field.as_str(), f.document_key.as_str())),
            type_name,
        )?;

        identifier_fields.sort_by_key(|f| f.order);
        partition_key_fields.sort_by_key(|f| f.order);

        Ok(Self {
            type_id: record_type.type_id(),
            type_name,
            table_name: schema
                .table_name()
                .unwrap_or_else(|| record_type.simple_name())
                .to_string(),
            partition_key_path: schema
                .declared_partition_key_path()
                .unwrap_or(DEFAULT_PARTITION_KEY_PATH)
                .to_string(),
            identifier_fields,
            partition_key_fields,
            searchable_fields,
            packed_fields,
            version_field,
        })
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified name of the described type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Stable collection name for the type
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn partition_key_path(&self) -> &str {
        &self.partition_key_path
    }

    /// Identifier fields in ascending order index
    pub fn identifier_fields(&self) -> &[KeyField] {
        &self.identifier_fields
    }

    /// Partition-key fields in ascending order index
    pub fn partition_key_fields(&self) -> &[KeyField] {
        &self.partition_key_fields
    }

    /// Searchable fields in declaration order
    pub fn searchable_fields(&self) -> &[SearchableField] {
        &self.searchable_fields
    }

    /// Packed fields in declaration order
    pub fn packed_fields(&self) -> &[String] {
        &self.packed_fields
    }

    pub fn version_field(&self) -> Option<&str> {
        self.version_field.as_deref()
    }
}

fn push_key_field(
    group_fields: &mut Vec<KeyField>,
    group: KeyGroup,
    name: &str,
    order: u32,
    key_type: KeyType,
    type_name: &str,
) -> SchemaResult<()> {
    if group_fields.iter().any(|f| f.name == name) {
        return Err(SchemaError::DuplicateKeyField {
            field: name.to_string(),
            group,
            type_name: type_name.to_string(),
        });
    }
    group_fields.push(KeyField {
        name: name.to_string(),
        order,
        key_type,
    });
    Ok(())
}

fn conflict(name: &str, existing: &FieldRole, requested: &FieldRole, type_name: &str) -> SchemaError {
    SchemaError::ConflictingRoles {
        field: name.to_string(),
        existing: existing.label(),
        requested: requested.label(),
        type_name: type_name.to_string(),
    }
}
