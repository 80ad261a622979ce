//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::formatters::{format_elapsed, summarize_body};
use crate::probe::ProbeOutcome;

/// Widest response excerpt shown in the summary table
const BODY_EXCERPT_WIDTH: usize = 60;

/// One summary row per probe request
#[derive(Debug, Tabled)]
pub struct ProbeRow {
    #[tabled(rename = "ENDPOINT")]
    pub endpoint: String,
    #[tabled(rename = "METHOD")]
    pub method: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
    #[tabled(rename = "TIME")]
    pub time: String,
    #[tabled(rename = "RESPONSE")]
    pub response: String,
}

impl From<&ProbeOutcome> for ProbeRow {
    fn from(outcome: &ProbeOutcome) -> Self {
        let (status, time, response) = match &outcome.result {
            Ok(resp) => (
                resp.status.to_string(),
                format_elapsed(resp.elapsed),
                summarize_body(&resp.body, BODY_EXCERPT_WIDTH),
            ),
            Err(err) => ("ERR".to_string(), "-".to_string(), err.clone()),
        };

        Self {
            endpoint: outcome.endpoint.clone(),
            method: outcome.request.method.to_string(),
            status,
            time,
            response,
        }
    }
}

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No requests issued.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
