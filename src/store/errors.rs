//! # Store Errors

use thiserror::Error;

use crate::optimizer::MapperError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Collection already exists: {0}")]
    CollectionExists(String),

    #[error("Collection '{0}' does not exist and auto-create is disabled")]
    AutoCreateDisabled(String),

    #[error("Document is missing its '{0}' value")]
    MissingKey(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Mapper(#[from] MapperError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::CollectionNotFound(_) => "DOCPACK_COLLECTION_NOT_FOUND",
            StoreError::CollectionExists(_) => "DOCPACK_COLLECTION_EXISTS",
            StoreError::AutoCreateDisabled(_) => "DOCPACK_AUTO_CREATE_DISABLED",
            StoreError::MissingKey(_) => "DOCPACK_MISSING_KEY",
            StoreError::Config(_) => "DOCPACK_CONFIG",
            StoreError::Mapper(e) => e.code(),
            StoreError::Internal(_) => "DOCPACK_INTERNAL",
        }
    }
}
