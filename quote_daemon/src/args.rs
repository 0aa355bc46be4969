//! Command-line arguments for the Quote Daemon.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use quote_common::config::{MINIMUM_INTERVAL_MINUTES, QUOTE_API_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Quote API endpoint returning a JSON array of quotes.
    #[clap(long, default_value = QUOTE_API_URL)]
    pub endpoint: String,

    /// Directory holding the persisted quote history.
    #[clap(long, default_value = "quote_store")]
    pub store_dir: String,

    /// Minimum number of minutes between two fetch invocations.
    #[clap(long, default_value_t = MINIMUM_INTERVAL_MINUTES)]
    pub interval_minutes: u64,
}
