//! Quote Viewer — displays the persisted quote history on the terminal.
//!
//! This binary is the foreground half of the system: it reads whatever the
//! daemon last committed to the store and prints the count followed by the
//! entries, newest first. It never errors on a missing or unreadable store;
//! an empty history simply prints `Quotes (0)`.
//!
//! Usage example (CLI):
//! ```bash
//! quote_viewer --store-dir ./quote_store
//! quote_viewer --trigger                 # fetch one quote now, then display
//! quote_viewer --watch 30                # re-display every 30 seconds
//! ```
//!
//! `--trigger` runs the same fetch cycle as the daemon's background task,
//! which makes the fetch-and-store path testable without waiting out the
//! scheduled interval. `--watch` mirrors a screen that refreshes whenever it
//! returns to the foreground.
#![warn(missing_docs)]
mod args;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use clap::Parser;
use log::{error, info, warn};
use quote_common::Quote;
use quote_common::Result;
use quote_common::fetch::{FetchOutcome, QuoteFetcher, run_fetch_cycle};
use quote_common::store::HistoryStore;

use crate::args::Args;

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let store = HistoryStore::new(&args.store_dir);

    if args.trigger {
        info!("Manual trigger: fetching one quote from {}", args.endpoint);
        let fetcher = QuoteFetcher::new(&args.endpoint)?;
        match run_fetch_cycle(&fetcher, &store) {
            FetchOutcome::Stored(quote) => {
                info!("Stored quote by {}: \"{}\"", quote.author, quote.text);
            }
            FetchOutcome::Empty => warn!("Quote endpoint returned no entries"),
            FetchOutcome::Failed(e) => error!("Error fetching quote: {}", e),
        }
    }

    match args.watch {
        None => render_history(&store.history_or_empty()),
        Some(secs) => watch_loop(&store, Duration::from_secs(secs.max(1))),
    }
    Ok(())
}

/// Print the count and the stored entries, newest first.
fn render_history(history: &[Quote]) {
    println!("Quotes ({})", history.len());
    for quote in history {
        println!("  \"{}\"", quote.text);
        println!("    - {}, {}", quote.author, format_timestamp(quote.timestamp));
    }
}

/// Re-read and re-print the history every `interval` until Ctrl+C.
fn watch_loop(store: &HistoryStore, interval: Duration) {
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down viewer...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    while !shutdown.load(Ordering::Relaxed) {
        render_history(&store.history_or_empty());
        // Sleep in short slices so Ctrl+C is picked up promptly.
        let mut remaining = interval;
        while !shutdown.load(Ordering::Relaxed) && !remaining.is_zero() {
            let slice = remaining.min(Duration::from_millis(200));
            thread::sleep(slice);
            remaining = remaining.saturating_sub(slice);
        }
    }
}

/// Render an epoch-millis timestamp in local time, falling back to the raw value.
fn format_timestamp(millis: u64) -> String {
    match DateTime::from_timestamp_millis(millis as i64) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => format!("@{}", millis),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch_millis_in_local_time() {
        let rendered = format_timestamp(1_700_000_000_000);
        assert!(rendered.contains("2023"));
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_raw() {
        let raw = i64::MAX as u64;
        assert_eq!(format_timestamp(raw), format!("@{}", raw));
    }
}
