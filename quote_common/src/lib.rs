//!
//! Common types and utilities shared by the quote daemon and viewer.
//!
//! This crate aggregates:
//! - `error` — unified error type `FetchError` used across the workspace.
//! - `result` — handy `Result<T, FetchError>` alias.
//! - `config` — fixed identifiers, intervals and the endpoint shared by both sides.
//! - `quote` — the wire and stored quote records.
//! - `store` — bounded, file-backed quote history persistence.
//! - `gate` — one-shot startup readiness signal.
//! - `fetch` — the fetch cycle (HTTP request, parse, append) run by the
//!   daemon's background task and the viewer's manual trigger.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod fetch;
pub mod gate;
pub mod quote;
pub mod result;
pub mod store;

pub use error::FetchError;
pub use quote::Quote;
pub use result::Result;
