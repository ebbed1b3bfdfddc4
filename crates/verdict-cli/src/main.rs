//! Verdict CLI.
//!
//! Reads identity attribute records from standard input, one JSON object per
//! line, and prints `authorized` or `unauthorized` for each.
//!
//! ```bash
//! echo '{"azure.authenticated":"true","azure.role":"admin"}' | verdict
//! # authorized
//! ```
//!
//! Exits 0 at end of input, 1 if standard input cannot be read, and 2 if
//! standard output cannot be written. Malformed lines never change the exit
//! status.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use verdict_abac::processor;

/// Verdict - authorization decisions for identity attribute records.
///
/// Reads one JSON object per line from stdin and writes one decision per line
/// to stdout. Parse diagnostics go to stderr.
#[derive(Parser)]
#[command(name = "verdict")]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    // Diagnostics only; stderr stays quiet by default.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let stdin = io::stdin();
    match processor::run(stdin.lock(), io::stdout().lock(), io::stderr()) {
        Ok(summary) => {
            tracing::debug!(?summary, "finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = %err, "terminating");
            ExitCode::from(err.exit_code())
        }
    }
}
