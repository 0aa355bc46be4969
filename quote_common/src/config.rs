//! Shared constants used by the daemon and the viewer.

/// Identifier under which the periodic fetch task is defined and registered.
pub const TASK_IDENTIFIER: &str = "fetch-quote-task";

/// Lower bound, in minutes, between two scheduled fetch invocations.
///
/// The scheduler treats this as a minimum spacing, not a promise of exact
/// periodicity.
pub const MINIMUM_INTERVAL_MINUTES: u64 = 15;

/// Storage key under which the serialized quote history is persisted.
pub const QUOTES_HISTORY_KEY: &str = "quotes_history";

/// Maximum number of quotes retained in the history; older entries are dropped.
pub const MAX_HISTORY_ITEMS: usize = 10;

/// Endpoint returning a JSON array with one random quote.
pub const QUOTE_API_URL: &str = "https://zenquotes.io/api/random";

/// Helper to build the on-disk file name for a storage key.
pub fn key_file_name(key: &str) -> String {
    format!("{}.json", key)
}
