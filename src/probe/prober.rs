//! Endpoint prober
//!
//! Issues the fixed create call followed by one request per endpoint table
//! entry, strictly one at a time. A transport failure on one endpoint is
//! recorded and the sweep moves on.

use log::warn;
use serde::Serialize;

use super::headers::HeaderSet;
use super::payload::CreateXnodeRequest;
use super::report::{ProbeOutcome, ProbeReport};
use super::table::EndpointTable;
use super::transport::{ProbeRequest, Transport};
use super::Method;
use crate::error::Result;

/// Endpoint that receives the fixed create payload
pub const CREATE_ENDPOINT: &str = "createXnode";

/// Receives outcomes as soon as each request completes
pub trait ProbeObserver {
    fn on_outcome(&mut self, outcome: &ProbeOutcome);
}

impl ProbeObserver for () {
    fn on_outcome(&mut self, _outcome: &ProbeOutcome) {}
}

/// A request the prober will issue, tagged with its endpoint name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRequest {
    pub endpoint: String,
    pub request: ProbeRequest,
}

/// Sequential endpoint prober
pub struct Prober<T: Transport> {
    transport: T,
    base_url: String,
    headers: HeaderSet,
    table: EndpointTable,
    send_create: bool,
}

impl<T: Transport> Prober<T> {
    pub fn new(transport: T, base_url: impl Into<String>, headers: HeaderSet, table: EndpointTable) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            headers,
            table,
            send_create: true,
        }
    }

    /// Enable or disable the leading create call
    pub fn with_create(mut self, send_create: bool) -> Self {
        self.send_create = send_create;
        self
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The create call alone
    pub fn create_request(&self) -> Result<PlannedRequest> {
        Ok(PlannedRequest {
            endpoint: CREATE_ENDPOINT.to_string(),
            request: ProbeRequest {
                method: Method::Post,
                url: join_url(&self.base_url, CREATE_ENDPOINT),
                body: Some(CreateXnodeRequest::fixed().to_json()?),
            },
        })
    }

    /// Every request a full sweep issues, in order, without sending anything.
    ///
    /// Table entries never carry a body, including POST and PUT entries.
    pub fn plan(&self) -> Result<Vec<PlannedRequest>> {
        let mut planned = Vec::with_capacity(self.table.len() + 1);
        if self.send_create {
            planned.push(self.create_request()?);
        }

        planned.extend(self.table.iter().map(|endpoint| PlannedRequest {
            endpoint: endpoint.name.clone(),
            request: ProbeRequest {
                method: endpoint.method,
                url: join_url(&self.base_url, &endpoint.name),
                body: None,
            },
        }));

        Ok(planned)
    }

    /// Run the full sweep
    pub async fn run(&self, observer: &mut dyn ProbeObserver) -> Result<ProbeReport> {
        let plan = self.plan()?;
        Ok(self.execute(plan, observer).await)
    }

    /// Send only the create call
    pub async fn run_create(&self, observer: &mut dyn ProbeObserver) -> Result<ProbeReport> {
        let plan = vec![self.create_request()?];
        Ok(self.execute(plan, observer).await)
    }

    async fn execute(&self, plan: Vec<PlannedRequest>, observer: &mut dyn ProbeObserver) -> ProbeReport {
        let mut report = ProbeReport::default();

        for PlannedRequest { endpoint, request } in plan {
            let result = match self.transport.send(&request, &self.headers).await {
                Ok(response) => Ok(response),
                Err(err) => {
                    warn!("{} {} failed: {}", request.method, request.url, err);
                    Err(err.to_string())
                }
            };

            let outcome = ProbeOutcome {
                endpoint,
                request,
                result,
            };
            observer.on_outcome(&outcome);
            report.push(outcome);
        }

        report
    }
}

/// Join base and endpoint name with exactly one slash
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), endpoint)
}
