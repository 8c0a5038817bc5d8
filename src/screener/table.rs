//! Plain-text table of a screening run, as printed by the CLI.

use std::fmt::Write;

use super::{ScreenReport, ScreenRow};

/// Trigger column for one row.
pub fn trigger_label(row: &ScreenRow) -> &'static str {
    match (row.triggered, row.insufficient_data) {
        (true, false) => "yes",
        (true, true) => "yes (short history)",
        (false, false) => "no",
        (false, true) => "no (short history)",
    }
}

/// Rows, skipped symbols and totals; EMA headers use the configured spans.
pub fn render_table(report: &ScreenReport, fast_span: usize, slow_span: usize) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{:<8} {:<10} {:>10} {:>10} {:>10} {:>10} {:>12} {:>10} {:>10}  Triggered",
        "Symbol",
        "Date",
        "Open",
        "High",
        "Low",
        "Close",
        "Volume",
        format!("EMA{}", fast_span),
        format!("EMA{}", slow_span)
    );
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{:<8} {:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12.0} {:>10.2} {:>10.2}  {}",
            row.symbol,
            row.date.to_string(),
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume,
            row.ema_fast,
            row.ema_slow,
            trigger_label(row)
        );
    }

    if !report.failures.is_empty() {
        let _ = writeln!(out, "\nSkipped:");
        for failure in &report.failures {
            let _ = writeln!(out, "  {}: {}", failure.symbol, failure.reason);
        }
    }

    let _ = writeln!(
        out,
        "\n{} screened, {} triggered, {} skipped",
        report.screened,
        report.triggered,
        report.failures.len()
    );
    out
}
