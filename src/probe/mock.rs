//! Recording transport for unit tests
//!
//! Captures every request with the headers it was sent with and replays
//! configured responses without touching the network.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::headers::HeaderSet;
use super::transport::{ProbeRequest, ProbeResponse, Transport};
use crate::error::{Result, TransportError};

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request: ProbeRequest,
    pub headers: Vec<(String, String)>,
}

/// Mock transport with per-call failure injection
#[derive(Default, Clone)]
pub struct MockTransport {
    /// Status returned for every successful call
    status: u16,
    /// Zero-based call indices that fail with a connect error
    fail_calls: Arc<HashSet<usize>>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            status: 200,
            ..Default::default()
        }
    }

    /// Return this status for every request
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Fail the given zero-based calls at the transport level
    pub fn failing_calls(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.fail_calls = Arc::new(calls.into_iter().collect());
        self
    }

    pub async fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ProbeRequest, headers: &HeaderSet) -> Result<ProbeResponse> {
        let mut captured = self.captured.lock().await;
        let index = captured.len();
        captured.push(CapturedRequest {
            request: request.clone(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        if self.fail_calls.contains(&index) {
            return Err(TransportError::Connect("connection refused".to_string()).into());
        }

        Ok(ProbeResponse {
            status: self.status,
            body: format!("{{\"endpoint\":\"{}\"}}", request.url),
            elapsed: Duration::from_millis(1),
        })
    }
}
