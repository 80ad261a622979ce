//! Endpoint probing: table, headers, payload, transport and the sweep itself

pub mod headers;
pub mod method;
#[cfg(test)]
pub mod mock;
pub mod payload;
pub mod prober;
pub mod report;
pub mod table;
pub mod transport;

pub use headers::HeaderSet;
#[cfg(test)]
pub use headers::{APP_ID_HEADER, SESSION_TOKEN_HEADER};
pub use method::Method;
pub use prober::{PlannedRequest, ProbeObserver, Prober};
pub use report::{ProbeOutcome, ProbeReport};
pub use table::{EndpointTable, MethodPolicy};
pub use transport::HttpTransport;
#[cfg(test)]
pub use transport::{ProbeRequest, ProbeResponse};
