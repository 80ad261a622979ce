//! Reusable formatting utilities for probe output

use std::time::Duration;

/// Format an elapsed request time.
///
/// # Example output
/// - `850ms`
/// - `2.41s`
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Collapse a response body to a single line of at most `max` characters.
///
/// Returns "(empty)" for blank bodies.
pub fn summarize_body(body: &str, max: usize) -> String {
    let flat: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return "(empty)".to_string();
    }

    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
