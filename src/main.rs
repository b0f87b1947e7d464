//! `vram_calc` command-line entry point.
//!
//! Tracing output goes to stderr and is filtered by `RUST_LOG`, so the report
//! (or the `--json` document) on stdout stays machine-readable.

mod cli;

use anyhow::Result;

fn main() -> Result<()> {
    // Logs never share stdout with the report
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    cli::run()
}
