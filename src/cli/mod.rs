//! CLI module for docpack
//!
//! Provides command-line interface for:
//! - inspect: Expand the packed blob of a document
//! - pack: Build a packed blob from a field map
//! - check-config: Validate a store configuration file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_config, inspect, inspect_document, pack, pack_fields, run, run_command};
pub use errors::{CliError, CliResult};
pub use io::{error_envelope, ok_envelope, parse_request, read_request, write_error, write_response};
