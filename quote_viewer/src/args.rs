//! Command-line arguments for the Quote Viewer.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use quote_common::config::QUOTE_API_URL;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory holding the persisted quote history.
    #[clap(long, default_value = "quote_store")]
    pub store_dir: String,

    /// Run one fetch cycle immediately before displaying the history.
    #[clap(long)]
    pub trigger: bool,

    /// Quote API endpoint used by `--trigger`.
    #[clap(long, default_value = QUOTE_API_URL)]
    pub endpoint: String,

    /// Re-read and re-display the history every N seconds until Ctrl+C.
    #[clap(long, value_name = "SECS")]
    pub watch: Option<u64>,
}
