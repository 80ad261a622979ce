//! Console output for probe results
//!
//! Pretty output streams each response as soon as it arrives; table and JSON
//! output are rendered once the sweep is complete.

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::probe::{HeaderSet, PlannedRequest, ProbeObserver, ProbeOutcome, ProbeReport};

pub mod formatters;
pub mod json;
pub mod table;

use json::{OutcomeRecord, format_json};
use table::{ProbeRow, format_table};

/// Streams outcomes to stdout in pretty mode
pub struct ConsoleObserver {
    format: OutputFormat,
}

impl ConsoleObserver {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl ProbeObserver for ConsoleObserver {
    fn on_outcome(&mut self, outcome: &ProbeOutcome) {
        if let OutputFormat::Pretty = self.format {
            println!("{}", render_outcome(outcome));
        }
    }
}

/// Pretty rendering of one outcome: request line, then the raw body or the error
pub fn render_outcome(outcome: &ProbeOutcome) -> String {
    let request_line = format!("{} {}", outcome.request.method, outcome.request.url);
    match &outcome.result {
        Ok(resp) => format!(
            "{} {}\n{}",
            request_line.cyan(),
            format!("[{}]", resp.status).dimmed(),
            resp.body
        ),
        Err(err) => format!("{}\n{} {}", request_line.cyan(), "✗".red(), err.red()),
    }
}

/// Print the end-of-run output for the chosen format
pub fn print_report(report: &ProbeReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            println!();
            println!("{}", render_summary(report));
        }
        OutputFormat::Table => {
            let rows: Vec<ProbeRow> = report.outcomes().iter().map(ProbeRow::from).collect();
            println!("{}", format_table(&rows));
            println!("{}", render_summary(report));
        }
        OutputFormat::Json => {
            let records: Vec<OutcomeRecord> =
                report.outcomes().iter().map(OutcomeRecord::from).collect();
            println!("{}", format_json(&records)?);
        }
    }
    Ok(())
}

/// One-line summary plus the list of endpoints that failed at the transport level
pub fn render_summary(report: &ProbeReport) -> String {
    let failures = report.failures();
    let mut summary = format!(
        "{} requests, {} answered, {} transport failures",
        report.len(),
        report.succeeded(),
        failures.len()
    );

    if failures.is_empty() {
        summary = format!("{} {}", "✓".green(), summary);
    } else {
        summary = format!("{} {}", "⚠".yellow(), summary);
        for failure in failures {
            let reason = failure.result.as_ref().err().map(String::as_str).unwrap_or_default();
            summary.push_str(&format!("\n  → {} ({})", failure.endpoint, reason));
        }
    }

    summary
}

/// Print the header set; secrets are masked unless `reveal` is set
pub fn print_headers(headers: &HeaderSet, reveal: bool) {
    println!("{}", "Request headers".bold());
    if reveal {
        print!("{}", headers.revealed());
    } else {
        print!("{}", headers);
    }
    println!();
}

/// Print planned requests without sending them
pub fn print_plan(plan: &[PlannedRequest], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(plan)?),
        _ => {
            for planned in plan {
                let body = if planned.request.body.is_some() {
                    " (with body)".dimmed().to_string()
                } else {
                    String::new()
                };
                println!(
                    "{:<5} {}{}",
                    planned.request.method.to_string(),
                    planned.request.url,
                    body
                );
            }
        }
    }
    Ok(())
}
