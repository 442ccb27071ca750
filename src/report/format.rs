//! Terminal formatting.
//!
//! We keep formatting code in one place so:
//! - the scan/inference code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{InstrumentAudit, SeriesAudit};

/// Format the full audit for one instrument, all frequencies.
pub fn format_instrument_audit(audit: &InstrumentAudit) -> String {
    let mut out = String::new();

    out.push_str(&format!("Instrument : {}\n\n", audit.instrument));

    for series in &audit.series {
        out.push_str(&format_series_audit(series));
        out.push('\n');
    }

    out
}

/// Format one frequency's coverage section.
pub fn format_series_audit(series: &SeriesAudit) -> String {
    let mut out = String::new();

    out.push_str(&format!("--- {} Series ---\n", series.frequency.display_name()));

    let (Some(start), Some(end)) = (series.start(), series.end()) else {
        out.push_str("No contracts found.\n");
        return out;
    };

    let report = &series.report;

    out.push_str(&format!("Contracts found : {}\n", series.contracts.len()));
    out.push_str(&format!("Start contract  : {start}\n"));
    out.push_str(&format!("End contract    : {end}\n"));
    out.push_str(&format!("Detected gap    : {} month(s)\n", report.expected_gap));

    out.push_str("Gap distribution:\n");
    for (gap, count) in &report.histogram {
        out.push_str(&format!("  {gap} month(s) : {count}\n"));
    }

    out.push_str(&format!("Missing count   : {}\n", report.missing.len()));
    if !report.missing.is_empty() {
        out.push_str("Missing contracts:\n");
        for m in &report.missing {
            out.push_str(&format!("  {m}\n"));
        }
    }

    out
}

/// Summary block for a header-rewrite run.
pub fn format_headers_summary(
    instrument: &str,
    data_dir: &std::path::Path,
    found: usize,
    modified: usize,
    skipped: usize,
    failed: usize,
) -> String {
    let mut out = String::new();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Instrument : {instrument}\n"));
    out.push_str(&format!("Directory  : {}\n", data_dir.display()));
    out.push_str(&format!("Files found: {found}\n"));
    out.push_str(&format!("Modified   : {modified}\n"));
    out.push_str(&format!("Skipped    : {skipped}\n"));
    out.push_str(&format!("Failed     : {failed}\n"));
    out
}
