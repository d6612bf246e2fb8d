//! CLI command implementations
//!
//! Each command reads at most one JSON value from stdin and writes one
//! response object to stdout. The transforms themselves are plain functions
//! over `serde_json::Value`.

use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::debug;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};
use crate::document::{packed, Document};
use crate::schema::PACKED_KEY;
use crate::store::StoreConfig;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command, reporting failures as an error response
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Inspect => inspect(),
        Command::Pack => pack(),
        Command::CheckConfig { config } => check_config(&config),
    };

    if let Err(e) = &result {
        write_error(e.code(), &e.to_string())?;
    }
    result
}

/// Print a document from stdin with `p` expanded
pub fn inspect() -> CliResult<()> {
    let request = read_request()?;
    write_response(inspect_document(request)?)
}

/// Print the packed blob for a field map from stdin
pub fn pack() -> CliResult<()> {
    let request = read_request()?;
    write_response(pack_fields(request)?)
}

/// Load and validate a store configuration
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = StoreConfig::load(config_path)?;
    debug!(path = %config_path.display(), database = %config.database, "config validated");
    write_response(serde_json::to_value(&config)?)
}

/// Replaces the `p` blob of a document with its decoded field map
pub fn inspect_document(request: Value) -> CliResult<Value> {
    let mut document = Document::try_from(request)?;

    if let Some(blob) = document.remove(PACKED_KEY) {
        let blob = blob
            .as_str()
            .ok_or_else(|| CliError::invalid_input("'p' must be a string"))?;
        let fields: Map<String, Value> = packed::unpack(blob)?.into_iter().collect();
        document.insert(PACKED_KEY, Value::Object(fields));
    }

    Ok(document.into())
}

/// Packs every property of a JSON object into a `p` blob
pub fn pack_fields(request: Value) -> CliResult<Value> {
    let Value::Object(fields) = request else {
        return Err(CliError::invalid_input("expected a JSON object of field values"));
    };

    let blob = packed::pack(fields.iter().map(|(name, value)| (name.as_str(), value)))?;
    Ok(json!({ PACKED_KEY: blob }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_pack_then_inspect() {
        let packed = pack_fields(json!({"notes": "hi", "count": 3})).unwrap();
        let blob = packed["p"].as_str().unwrap().to_string();

        let inspected = inspect_document(json!({"id": "abc", "PK": "", "p": blob})).unwrap();
        assert_eq!(inspected["id"], "abc");
        assert_eq!(inspected["p"], json!({"notes": "hi", "count": 3}));
    }

    #[test]
    fn test_inspect_without_blob() {
        let inspected = inspect_document(json!({"id": "abc"})).unwrap();
        assert_eq!(inspected, json!({"id": "abc"}));
    }

    #[test]
    fn test_inspect_bad_blob() {
        let err = inspect_document(json!({"p": "%%%"})).unwrap_err();
        assert_eq!(err.code(), "DOCPACK_BLOB_BASE64");

        let err = inspect_document(json!({"p": 5})).unwrap_err();
        assert_eq!(err.code(), "DOCPACK_CLI_INVALID_INPUT");
    }

    #[test]
    fn test_pack_requires_object() {
        let err = pack_fields(json!([1, 2])).unwrap_err();
        assert_eq!(err.code(), "DOCPACK_CLI_INVALID_INPUT");
    }

    #[test]
    fn test_check_config_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": "shop", "default_throughput": 250}}"#).unwrap();

        let err = StoreConfig::load(file.path()).map_err(CliError::from).unwrap_err();
        assert_eq!(err.code(), "DOCPACK_CLI_CONFIG_ERROR");
    }
}
