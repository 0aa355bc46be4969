//! One fetch cycle: HTTP request, parse, store-append.
//!
//! This is the unit of work behind both the daemon's periodic task and the
//! viewer's manual trigger. The cycle never propagates an error to its caller;
//! it reports an explicit [`FetchOutcome`] and lets the caller decide what to
//! log or display. A failed cycle simply produces no history update; retry is
//! implicit in the next scheduled invocation.

use std::time::Duration;

use crate::quote::ApiQuote;
use crate::store::HistoryStore;
use crate::{FetchError, Quote, Result};

/// Request timeout for one call to the quote endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of one fetch cycle.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A quote was fetched and appended to the history.
    Stored(Quote),
    /// The endpoint answered with an empty array; nothing was appended.
    Empty,
    /// The cycle failed (network, parse, or storage); nothing was appended.
    Failed(FetchError),
}

/// Blocking HTTP client bound to a fixed quote endpoint.
pub struct QuoteFetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl QuoteFetcher {
    /// Build a fetcher for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint this fetcher talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint and return the first quote of the response array,
    /// or `None` if the array is empty.
    pub fn fetch_first(&self) -> Result<Option<ApiQuote>> {
        let response = self.client.get(&self.endpoint).send()?;
        let body = response.error_for_status()?.text()?;
        let mut quotes = parse_quotes(&body)?;
        if quotes.is_empty() {
            Ok(None)
        } else {
            Ok(Some(quotes.remove(0)))
        }
    }
}

/// Decode a response body into wire quote records.
pub fn parse_quotes(body: &str) -> Result<Vec<ApiQuote>> {
    let quotes: Vec<ApiQuote> = serde_json::from_str(body)?;
    Ok(quotes)
}

/// Run one full cycle against `store` and report the outcome.
pub fn run_fetch_cycle(fetcher: &QuoteFetcher, store: &HistoryStore) -> FetchOutcome {
    apply_fetch(fetcher.fetch_first(), store)
}

/// Store-append step of the cycle, split from the network step so the
/// empty/failure paths are testable without an endpoint.
fn apply_fetch(fetched: Result<Option<ApiQuote>>, store: &HistoryStore) -> FetchOutcome {
    match fetched {
        Ok(Some(api)) => match store.append(api) {
            Ok(quote) => FetchOutcome::Stored(quote),
            Err(e) => FetchOutcome::Failed(e),
        },
        Ok(None) => FetchOutcome::Empty,
        Err(e) => FetchOutcome::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_a_quote_array() {
        let quotes = parse_quotes(r#"[{"q":"A","a":"X","c":"","h":"hh"}]"#).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].quote, "A");
    }

    #[test]
    fn parse_rejects_non_array_bodies() {
        assert!(parse_quotes(r#"{"q":"A"}"#).is_err());
        assert!(parse_quotes("not json").is_err());
    }

    #[test]
    fn fetched_quote_is_appended() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let api = ApiQuote {
            quote: "A".into(),
            author: "X".into(),
            category: None,
            source_hash: None,
        };

        match apply_fetch(Ok(Some(api)), &store) {
            FetchOutcome::Stored(quote) => assert_eq!(quote.text, "A"),
            other => panic!("expected Stored, got {:?}", other),
        }
        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn empty_response_appends_nothing() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        match apply_fetch(Ok(None), &store) {
            FetchOutcome::Empty => {}
            other => panic!("expected Empty, got {:?}", other),
        }
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn failed_fetch_appends_nothing() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());

        let err = FetchError::Format("boom".into());
        match apply_fetch(Err(err), &store) {
            FetchOutcome::Failed(_) => {}
            other => panic!("expected Failed, got {:?}", other),
        }
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn empty_array_parses_to_no_quotes() {
        assert!(parse_quotes("[]").unwrap().is_empty());
    }
}
