//! CLI argument definitions using clap
//!
//! Commands:
//! - docpack inspect
//! - docpack pack
//! - docpack check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docpack - compact document mapping for typed records
#[derive(Parser, Debug)]
#[command(name = "docpack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a document from stdin and print it with its packed blob expanded
    Inspect,

    /// Read a JSON object of field values from stdin and print its packed blob
    Pack,

    /// Load and validate a store configuration file
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./docpack.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
