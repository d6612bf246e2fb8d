//! docpack CLI entry point
//!
//! Installs logging, delegates to `cli::run`, and exits non-zero on failure.
//! Logs go to stderr; stdout carries only the JSON response.

use docpack::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
