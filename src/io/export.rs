//! Audit JSON export.
//!
//! The export is a self-describing artifact: tool name, generation
//! timestamp, and the full per-series audit (contracts, expected gap,
//! histogram, missing list). Useful for diffing audits over time or feeding
//! downstream checks.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::domain::InstrumentAudit;
use crate::error::AppError;

/// On-disk shape of an exported audit.
#[derive(Debug, Serialize)]
struct AuditFile<'a> {
    tool: &'static str,
    generated: String,
    instrument: &'a str,
    series: &'a [crate::domain::SeriesAudit],
}

/// Write the audit as pretty-printed JSON.
pub fn write_audit_json(path: &Path, audit: &InstrumentAudit) -> Result<(), AppError> {
    let artifact = AuditFile {
        tool: "caudit",
        generated: Local::now().to_rfc3339(),
        instrument: &audit.instrument,
        series: &audit.series,
    };

    let file = File::create(path).map_err(|e| {
        AppError::processing(format!("Failed to create '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, &artifact)
        .map_err(|e| AppError::processing(format!("Failed to write audit JSON: {e}")))?;
    Ok(())
}
