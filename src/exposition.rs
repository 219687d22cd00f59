//! Prometheus text exposition format
//!
//! Renders the stored quotes as one gauge family with a `stock` label per
//! sample, ready to be served from `/metrics`.

use crate::constants::{METRIC_HELP, METRIC_LABEL, METRIC_NAME};
use crate::types::Quote;

/// Renders quotes into Prometheus text format
///
/// HELP and TYPE lines are always present, even with no samples.
pub fn render_prometheus(quotes: &[Quote]) -> String {
    let mut out = String::new();

    out.push_str(&format!("# HELP {METRIC_NAME} {METRIC_HELP}\n"));
    out.push_str(&format!("# TYPE {METRIC_NAME} gauge\n"));
    for q in quotes {
        out.push_str(&format!(
            "{METRIC_NAME}{{{METRIC_LABEL}=\"{}\"}} {}\n",
            escape_label_value(&q.symbol),
            format_value(q.price)
        ));
    }

    out
}

/// Escapes a label value: backslash, double quote and newline
fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Formats a sample value, spelling out non-finite values the way Prometheus does
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}
