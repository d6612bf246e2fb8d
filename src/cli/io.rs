//! JSON I/O handling for CLI
//!
//! - Input: a single JSON value on stdin
//! - Output: a single JSON object on stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read a JSON request from stdin
pub fn read_request() -> CliResult<Value> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

/// Parse request text
pub fn parse_request(input: &str) -> CliResult<Value> {
    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(input)?;
    Ok(value)
}

/// Wraps command output in the `{"status": "ok", "data": ...}` envelope.
///
/// `data` is the expanded document for `inspect`, `{"p": blob}` for `pack`,
/// and the normalized config for `check-config`.
pub fn ok_envelope(data: Value) -> Value {
    json!({ "status": "ok", "data": data })
}

/// Envelope for a failed command; `code` is a `DOCPACK_*` error code
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({ "status": "error", "code": code, "message": message })
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    emit(&ok_envelope(data))
}

/// Write an error response to stdout, so scripted callers always get JSON
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    emit(&error_envelope(code, message))
}

/// One envelope per line; stdout carries nothing else
fn emit(envelope: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, envelope)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
