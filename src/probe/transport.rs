//! HTTP transport used by the prober

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::Client as HttpClient;
use serde::Serialize;

use super::headers::HeaderSet;
use super::method::Method;
use crate::error::{Result, TransportError};

/// A single outbound probe request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// Raw response as received; status codes are not interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

/// Sends probe requests.
///
/// Implementations return `Ok` for every HTTP response regardless of status and
/// reserve `Err` for transport-level failures.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ProbeRequest, headers: &HeaderSet) -> Result<ProbeResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    http: HttpClient,
    rate_limiter: Option<Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>>,
}

impl HttpTransport {
    /// Create a transport with an optional request timeout and pacing rate (requests/second)
    pub fn new(timeout: Option<Duration>, rate: Option<NonZeroU32>) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::from)?;

        let rate_limiter =
            rate.map(|per_second| Arc::new(RateLimiter::direct(Quota::per_second(per_second))));

        Ok(Self { http, rate_limiter })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ProbeRequest, headers: &HeaderSet) -> Result<ProbeResponse> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let mut builder = self
            .http
            .request(request.method.into(), &request.url)
            .headers(headers.to_header_map()?);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!("{} {}", request.method, request.url);
        let started = Instant::now();
        let response = builder.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::from)?;
        let elapsed = started.elapsed();
        debug!("{} {} -> {} in {:?}", request.method, request.url, status, elapsed);

        Ok(ProbeResponse {
            status,
            body,
            elapsed,
        })
    }
}
