//! Error types shared between the daemon and the viewer.
//!
//! The `FetchError` enum unifies common failure cases for I/O, HTTP transport,
//! serialization, channel communication, and internal logic, allowing crates to
//! propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the daemon and the viewer.
#[derive(Error, Debug)]
pub enum FetchError {
    /// I/O error originating from the standard library or the store files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// HTTP transport failure while talking to the quote endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Crossbeam/channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// A background task identifier was used before `define_task` introduced it.
    #[error("Internal Logic Error: Task not defined: {0}")]
    TaskNotDefined(String),
}

impl<T> From<PoisonError<T>> for FetchError {
    fn from(err: PoisonError<T>) -> Self {
        FetchError::MutexLock(err.to_string())
    }
}
