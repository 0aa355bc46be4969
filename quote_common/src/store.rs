//! Bounded, file-backed quote history persistence.
//!
//! The history is one JSON blob stored under a single fixed key, materialized
//! as `<store_dir>/quotes_history.json`. It holds at most
//! [`MAX_HISTORY_ITEMS`](crate::config::MAX_HISTORY_ITEMS) entries, newest
//! first; older entries past the cap are silently discarded on write.
//!
//! Failure contract:
//! - `read_all` reports failures with their kind (`Io` vs `SerdeJson`) so
//!   callers can decide what to log; a never-written store is `Ok(empty)`,
//!   not an error.
//! - `history_or_empty` is the reader-facing surface used by the viewer and
//!   the daemon startup: absent or corrupt content degrades to an empty
//!   history with a warning, and is overwritten by the next successful append.
//!
//! The write path goes through a temp file in the same directory followed by a
//! rename, so a reader never observes a half-written blob. Read-modify-write
//! is not locked across processes; the scheduler guarantees at most one
//! concurrent writer.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::config::{MAX_HISTORY_ITEMS, QUOTES_HISTORY_KEY, key_file_name};
use crate::quote::{ApiQuote, Quote};
use crate::Result;

/// Persistent, bounded quote history under a single storage key.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    /// Directory holding one JSON file per storage key.
    dir: PathBuf,
}

impl HistoryStore {
    /// Create a store rooted at `dir`. The directory is created lazily on the
    /// first write; a missing directory reads as an empty history.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing the history key.
    pub fn history_path(&self) -> PathBuf {
        self.dir.join(key_file_name(QUOTES_HISTORY_KEY))
    }

    /// Stamp `api` with the current time, prepend it to the stored history,
    /// truncate to the cap, and persist the result.
    ///
    /// A prior absent or unreadable history is treated as empty, so an append
    /// always succeeds unless the write itself fails. Returns the stored entry.
    pub fn append(&self, api: ApiQuote) -> Result<Quote> {
        let quote = Quote::received_now(api);
        let mut history = self.history_or_empty();
        history.insert(0, quote.clone());
        history.truncate(MAX_HISTORY_ITEMS);
        self.write(&history)?;
        Ok(quote)
    }

    /// Read and deserialize the stored history, newest first.
    ///
    /// A store that has never been written yields `Ok` with an empty list.
    /// Read and parse failures are returned with their kind.
    pub fn read_all(&self) -> Result<Vec<Quote>> {
        let path = self.history_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        let history: Vec<Quote> = serde_json::from_str(&raw)?;
        Ok(history)
    }

    /// Reader-facing history access: returns the stored entries, or an empty
    /// list if nothing was ever stored or the stored blob cannot be decoded.
    /// Failures are logged here, never propagated.
    pub fn history_or_empty(&self) -> Vec<Quote> {
        match self.read_all() {
            Ok(history) => history,
            Err(e) => {
                warn!("Failed to read quote history, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Serialize `history` and replace the stored blob atomically.
    fn write(&self, history: &[Quote]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(history)?;
        let path = self.history_path();
        let tmp_path = tmp_sibling(&path);
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// Temp-file path next to `path`, on the same filesystem so the rename is atomic.
fn tmp_sibling(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn api(text: &str, author: &str) -> ApiQuote {
        ApiQuote {
            quote: text.into(),
            author: author.into(),
            category: None,
            source_hash: None,
        }
    }

    #[test]
    fn never_written_store_reads_empty() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        assert!(store.read_all().unwrap().is_empty());
        assert!(store.history_or_empty().is_empty());
    }

    #[test]
    fn append_to_empty_store_yields_single_stamped_entry() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        let stored = store.append(api("A", "X")).unwrap();
        let history = store.read_all().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "A");
        assert_eq!(history[0].author, "X");
        assert_eq!(history[0].timestamp, stored.timestamp);
        assert!(stored.timestamp > 0);
    }

    #[test]
    fn history_is_newest_first() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        for i in 0..5 {
            store.append(api(&format!("q{}", i), "X")).unwrap();
        }
        let history = store.read_all().unwrap();
        let texts: Vec<&str> = history.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["q4", "q3", "q2", "q1", "q0"]);
    }

    #[test]
    fn history_is_capped_and_drops_the_oldest() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        for i in 0..MAX_HISTORY_ITEMS {
            store.append(api(&format!("q{}", i), "X")).unwrap();
        }
        assert_eq!(store.read_all().unwrap().len(), MAX_HISTORY_ITEMS);

        store.append(api("newest", "X")).unwrap();
        let history = store.read_all().unwrap();
        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        assert_eq!(history[0].text, "newest");
        // q0 was the oldest entry and falls off the end.
        assert!(history.iter().all(|q| q.text != "q0"));
        assert_eq!(history.last().unwrap().text, "q1");
    }

    #[test]
    fn corrupt_blob_degrades_to_empty_for_readers() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.history_path(), "{not json").unwrap();

        assert!(store.read_all().is_err());
        assert!(store.history_or_empty().is_empty());
    }

    #[test]
    fn append_over_corrupt_blob_recovers_with_one_entry() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.history_path(), "[[[").unwrap();

        store.append(api("fresh", "X")).unwrap();
        let history = store.read_all().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "fresh");
    }

    #[test]
    fn no_temp_file_is_left_behind() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        store.append(api("A", "X")).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
