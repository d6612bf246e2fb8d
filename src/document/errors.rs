//! Document codec errors

use thiserror::Error;

/// Result type for document codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while building or reading document payloads
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("Document must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("Malformed '{key}' value: {reason}")]
    MalformedKey { key: &'static str, reason: String },

    #[error("Key field '{field}' expects {expected}, got {found}")]
    UnsupportedKeyValue {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Key segment '{text}' is not a valid {expected} for field '{field}'")]
    KeySegmentParse {
        field: String,
        expected: &'static str,
        text: String,
    },

    #[error("Packed blob is not valid base64: {0}")]
    Base64(String),

    #[error("Packed blob failed to decompress: {0}")]
    Decompress(String),

    #[error("Packed blob failed to encode: {0}")]
    Encode(String),

    #[error("Packed blob failed to decode: {0}")]
    Decode(String),

    #[error("Packed field '{field}' holds a non-finite float")]
    NonFiniteFloat { field: String },
}

impl CodecError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::NotAnObject { .. } => "DOCPACK_NOT_AN_OBJECT",
            CodecError::MalformedKey { .. } => "DOCPACK_MALFORMED_KEY",
            CodecError::UnsupportedKeyValue { .. } => "DOCPACK_UNSUPPORTED_KEY_VALUE",
            CodecError::KeySegmentParse { .. } => "DOCPACK_KEY_SEGMENT_PARSE",
            CodecError::Base64(_) => "DOCPACK_BLOB_BASE64",
            CodecError::Decompress(_) => "DOCPACK_BLOB_DECOMPRESS",
            CodecError::Encode(_) => "DOCPACK_BLOB_ENCODE",
            CodecError::Decode(_) => "DOCPACK_BLOB_DECODE",
            CodecError::NonFiniteFloat { .. } => "DOCPACK_NON_FINITE_FLOAT",
        }
    }
}

/// JSON type name for error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
