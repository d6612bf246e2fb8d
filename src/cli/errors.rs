//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit status.

use std::io;

use thiserror::Error;

use crate::document::CodecError;
use crate::store::StoreError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "DOCPACK_CLI_CONFIG_ERROR",
            CliError::Io(_) => "DOCPACK_CLI_IO_ERROR",
            CliError::InvalidInput(_) => "DOCPACK_CLI_INVALID_INPUT",
            CliError::Codec(e) => e.code(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        CliError::Io(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CliError::InvalidInput(msg.into())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON error: {}", e))
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Config(msg) => CliError::Config(msg),
            other => CliError::Config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_error_maps_to_config() {
        let err = CliError::from(StoreError::Config("database must not be empty".into()));
        assert_eq!(err.code(), "DOCPACK_CLI_CONFIG_ERROR");
        assert!(err.to_string().contains("database must not be empty"));
    }

    #[test]
    fn test_codec_code_passes_through() {
        let err = CliError::from(CodecError::Base64("bad".into()));
        assert_eq!(err.code(), "DOCPACK_BLOB_BASE64");
    }
}
