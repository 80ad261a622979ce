//! Per-run probe results

use super::transport::{ProbeRequest, ProbeResponse};

/// Result of one probe request
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Endpoint name the request was issued for
    pub endpoint: String,
    pub request: ProbeRequest,
    /// Response, or the transport error message
    pub result: Result<ProbeResponse, String>,
}

impl ProbeOutcome {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    #[cfg(test)]
    pub fn status(&self) -> Option<u16> {
        self.result.as_ref().ok().map(|r| r.status)
    }
}

/// Ordered outcomes of a sweep
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    outcomes: Vec<ProbeOutcome>,
}

impl ProbeReport {
    pub fn push(&mut self, outcome: ProbeOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    /// Requests that failed at the transport level
    pub fn failures(&self) -> Vec<&ProbeOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure()).collect()
    }

    /// Requests that received any HTTP response
    pub fn succeeded(&self) -> usize {
        self.outcomes.len() - self.failures().len()
    }

    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| !o.is_failure())
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
