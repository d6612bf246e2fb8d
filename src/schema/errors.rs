//! Schema error types
//!
//! Every schema error is raised at registration time and rejects the whole
//! type. Error codes:
//! - DOCPACK_RESERVED_SEARCHABLE_KEY
//! - DOCPACK_IDENTIFIER_DUPLICATE_ORDER
//! - DOCPACK_PARTITION_KEY_DUPLICATE_ORDER
//! - DOCPACK_DUPLICATE_KEY_FIELD
//! - DOCPACK_DUPLICATE_DOCUMENT_KEY
//! - DOCPACK_CONFLICTING_ROLES
//! - DOCPACK_DUPLICATE_VERSION_FIELD

use std::fmt;

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Which composed key a field contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyGroup {
    Identifier,
    PartitionKey,
}

impl fmt::Display for KeyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyGroup::Identifier => write!(f, "identifier"),
            KeyGroup::PartitionKey => write!(f, "partition key"),
        }
    }
}

/// Schema validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Searchable key '{key}' of field '{field}' on type '{type_name}' is a reserved document key")]
    ReservedSearchableKey {
        key: String,
        field: String,
        type_name: String,
    },

    #[error("Identifier fields '{first}' and '{second}' on type '{type_name}' share order {order}")]
    IdentifierDuplicateOrder {
        first: String,
        second: String,
        order: u32,
        type_name: String,
    },

    #[error("Partition key fields '{first}' and '{second}' on type '{type_name}' share order {order}")]
    PartitionKeyDuplicateOrder {
        first: String,
        second: String,
        order: u32,
        type_name: String,
    },

    #[error("Field '{field}' is declared twice in the {group} of type '{type_name}'")]
    DuplicateKeyField {
        field: String,
        group: KeyGroup,
        type_name: String,
    },

    #[error("Searchable fields '{first}' and '{second}' on type '{type_name}' both map to document key '{key}'")]
    DuplicateDocumentKey {
        key: String,
        first: String,
        second: String,
        type_name: String,
    },

    #[error("Field '{field}' on type '{type_name}' cannot be both {existing} and {requested}")]
    ConflictingRoles {
        field: String,
        existing: &'static str,
        requested: &'static str,
        type_name: String,
    },

    #[error("Type '{type_name}' declares two version fields: '{first}' and '{second}'")]
    DuplicateVersionField {
        first: String,
        second: String,
        type_name: String,
    },
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::ReservedSearchableKey { .. } => "DOCPACK_RESERVED_SEARCHABLE_KEY",
            SchemaError::IdentifierDuplicateOrder { .. } => "DOCPACK_IDENTIFIER_DUPLICATE_ORDER",
            SchemaError::PartitionKeyDuplicateOrder { .. } => {
                "DOCPACK_PARTITION_KEY_DUPLICATE_ORDER"
            }
            SchemaError::DuplicateKeyField { .. } => "DOCPACK_DUPLICATE_KEY_FIELD",
            SchemaError::DuplicateDocumentKey { .. } => "DOCPACK_DUPLICATE_DOCUMENT_KEY",
            SchemaError::ConflictingRoles { .. } => "DOCPACK_CONFLICTING_ROLES",
            SchemaError::DuplicateVersionField { .. } => "DOCPACK_DUPLICATE_VERSION_FIELD",
        }
    }

    /// Name of the type that failed validation
    pub fn type_name(&self) -> &str {
        match self {
            SchemaError::ReservedSearchableKey { type_name, .. }
            | SchemaError::IdentifierDuplicateOrder { type_name, .. }
            | SchemaError::PartitionKeyDuplicateOrder { type_name, .. }
            | SchemaError::DuplicateKeyField { type_name, .. }
            | SchemaError::DuplicateDocumentKey { type_name, .. }
            | SchemaError::ConflictingRoles { type_name, .. }
            | SchemaError::DuplicateVersionField { type_name, .. } => type_name,
        }
    }

    pub(crate) fn duplicate_order(
        group: KeyGroup,
        first: &str,
        second: &str,
        order: u32,
        type_name: &str,
    ) -> Self {
        let (first, second, type_name) = (first.into(), second.into(), type_name.into());
        match group {
            KeyGroup::Identifier => SchemaError::IdentifierDuplicateOrder {
                first,
                second,
                order,
                type_name,
            },
            KeyGroup::PartitionKey => SchemaError::PartitionKeyDuplicateOrder {
                first,
                second,
                order,
                type_name,
            },
        }
    }
}
