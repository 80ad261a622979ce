//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::probe::{Method, ProbeOutcome};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the run
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp of the output
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Serializable view of a probe outcome
#[derive(Debug, Serialize)]
pub struct OutcomeRecord<'a> {
    pub endpoint: &'a str,
    pub method: Method,
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> From<&'a ProbeOutcome> for OutcomeRecord<'a> {
    fn from(outcome: &'a ProbeOutcome) -> Self {
        let (status, elapsed_ms, body, error) = match &outcome.result {
            Ok(resp) => (
                Some(resp.status),
                Some(resp.elapsed.as_millis() as u64),
                Some(resp.body.as_str()),
                None,
            ),
            Err(err) => (None, None, None, Some(err.as_str())),
        };

        Self {
            endpoint: &outcome.endpoint,
            method: outcome.request.method,
            url: &outcome.request.url,
            status,
            elapsed_ms,
            body,
            error,
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}
