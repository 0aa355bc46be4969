//! Quote Daemon — periodically fetches a random quote and stores it in a
//! bounded history.
//!
//! This binary is the background half of the system. At startup it wires
//! together three building blocks from `quote_common`:
//!
//! - `StartupGate` — one-shot readiness signal, created before anything else;
//!   the first background fetch waits on it so it cannot race the startup
//!   sequence.
//! - `TaskScheduler` — defines the named fetch task and registers it for
//!   periodic invocation (idempotently; an already-registered identifier is
//!   skipped).
//! - `HistoryStore` / `QuoteFetcher` — the fetch cycle appends the first
//!   quote of the endpoint's JSON array to the persisted history, capped at
//!   ten entries, newest first.
//!
//! Per task invocation the order is strict: gate-wait, then fetch, then
//! store-append. A cycle that fails (network, parse, empty result, storage)
//! logs its outcome and produces no history update; the next scheduled
//! invocation is the retry.
//!
//! Shutdown: Ctrl+C stops the scheduler workers and exits. No task state
//! survives the process beyond the persisted history file.
#![warn(missing_docs)]
mod args;
mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::bounded;
use log::{error, info, warn};
use quote_common::FetchError;
use quote_common::Result;
use quote_common::config::TASK_IDENTIFIER;
use quote_common::fetch::{FetchOutcome, QuoteFetcher, run_fetch_cycle};
use quote_common::gate::StartupGate;
use quote_common::store::HistoryStore;

use crate::args::Args;
use crate::scheduler::TaskScheduler;

fn main() -> Result<(), FetchError> {
    init_logger();
    let args = Args::parse();

    // The gate exists before any task can run.
    let gate = Arc::new(StartupGate::new());
    let store = HistoryStore::new(&args.store_dir);
    let fetcher = QuoteFetcher::new(&args.endpoint)?;
    let scheduler = TaskScheduler::new();

    info!(
        "Fetching from {} into {}",
        fetcher.endpoint(),
        store.history_path().display()
    );

    let task_gate = Arc::clone(&gate);
    let task_store = store.clone();
    scheduler.define_task(TASK_IDENTIFIER, move || {
        info!("Background task started");
        task_gate.wait();
        match run_fetch_cycle(&fetcher, &task_store) {
            FetchOutcome::Stored(quote) => {
                info!("Stored quote by {}: \"{}\"", quote.author, quote.text);
            }
            FetchOutcome::Empty => {
                warn!("Quote endpoint returned no entries this cycle");
            }
            FetchOutcome::Failed(e) => {
                error!("Error fetching quote: {}", e);
            }
        }
        info!("Background task done");
    })?;

    if !scheduler.is_registered(TASK_IDENTIFIER)? {
        let interval = Duration::from_secs(args.interval_minutes * 60);
        scheduler.register_task(TASK_IDENTIFIER, interval)?;
    }

    // Startup sequence: surface the current history once, then open the gate.
    let history = store.history_or_empty();
    info!("Quotes ({})", history.len());
    for quote in &history {
        info!("  \"{}\" - {}", quote.text, quote.author);
    }
    gate.resolve();

    let (stop_tx, stop_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .expect("Error setting Ctrl+C handler");

    info!("Daemon is running. Press Ctrl+C to exit.");
    let _ = stop_rx.recv();
    info!("Ctrl+C received. Shutting down daemon...");
    scheduler.shutdown();
    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
