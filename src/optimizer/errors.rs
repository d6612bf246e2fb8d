//! Mapping error types
//!
//! Taxonomy:
//! - initialization order: `NotInitialized`
//! - schema validation: `Schema` (registration only)
//! - malformed input: `EmptyDocument`, `TypeNotRegistered`, `Codec`
//! - record accessors: `Field`
//!
//! The soft-failure decode path is not an error; see [`Decoded`].
//!
//! [`Decoded`]: super::Decoded

use thiserror::Error;

use crate::document::CodecError;
use crate::record::FieldError;
use crate::schema::SchemaError;

/// Result type for registry and mapping operations
pub type MapResult<T> = Result<T, MapperError>;

/// Registry and mapping errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapperError {
    #[error("Optimizer is not initialized; call Optimizer::init first")]
    NotInitialized,

    #[error("Type '{type_name}' is not registered")]
    TypeNotRegistered { type_name: String },

    #[error("packed object contained no properties")]
    EmptyDocument,

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl MapperError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            MapperError::NotInitialized => "DOCPACK_NOT_INITIALIZED",
            MapperError::TypeNotRegistered { .. } => "DOCPACK_TYPE_NOT_REGISTERED",
            MapperError::EmptyDocument => "DOCPACK_EMPTY_DOCUMENT",
            MapperError::Schema(e) => e.code(),
            MapperError::Codec(e) => e.code(),
            MapperError::Field(e) => e.code(),
        }
    }

    /// True for errors caused by the caller's input rather than by state
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            MapperError::EmptyDocument | MapperError::Codec(_) | MapperError::Field(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_message() {
        let err = MapperError::EmptyDocument;
        assert_eq!(err.to_string(), "packed object contained no properties");
        assert!(err.is_argument_error());
    }

    #[test]
    fn test_nested_codes_pass_through() {
        let err = MapperError::from(CodecError::Base64("x".into()));
        assert_eq!(err.code(), "DOCPACK_BLOB_BASE64");

        let err = MapperError::from(FieldError::Unknown("f".into()));
        assert_eq!(err.code(), "DOCPACK_UNKNOWN_FIELD");
    }

    #[test]
    fn test_state_errors_are_not_argument_errors() {
        assert!(!MapperError::NotInitialized.is_argument_error());
        assert!(!MapperError::TypeNotRegistered {
            type_name: "T".into()
        }
        .is_argument_error());
    }
}
