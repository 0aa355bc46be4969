//! Quote data model and JSON encoding helpers.
//!
//! Two record shapes live here. `ApiQuote` mirrors the remote endpoint's wire
//! format, which uses one-letter field names (`q`uote, `a`uthor, `c`ategory,
//! `h`ash). `Quote` is the stored form: the same content under readable field
//! names plus a millisecond UTC timestamp assigned locally at storage time,
//! never taken from the API response.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::FetchError;

/// Quote record as returned by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiQuote {
    /// Quote text.
    #[serde(rename = "q")]
    pub quote: String,
    /// Author name.
    #[serde(rename = "a")]
    pub author: String,
    /// Category label; not used downstream beyond storage.
    #[serde(rename = "c", default)]
    pub category: Option<String>,
    /// Source hash assigned by the API; not used downstream beyond storage.
    #[serde(rename = "h", default)]
    pub source_hash: Option<String>,
}

/// Stored quote entry: fetched content plus the local fetch timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Quote text.
    pub text: String,
    /// Author name.
    pub author: String,
    /// Category label carried over from the API, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// Source hash carried over from the API, if any.
    #[serde(default)]
    pub source_hash: Option<String>,
    /// UTC timestamp in milliseconds since Unix epoch, assigned at storage time.
    pub timestamp: u64,
}

impl Quote {
    /// Build a stored entry from a wire record, stamping it with the current time.
    pub fn received_now(api: ApiQuote) -> Quote {
        Self::from_api(api, Utc::now().timestamp_millis() as u64)
    }

    /// Build a stored entry from a wire record with an explicit timestamp.
    pub fn from_api(api: ApiQuote, timestamp: u64) -> Quote {
        Quote {
            text: api.quote,
            author: api.author,
            category: api.category,
            source_hash: api.source_hash,
            timestamp,
        }
    }

    /// Encode the quote to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, FetchError> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}
