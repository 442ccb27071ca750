//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while auditing
//! - exported to JSON
//! - rendered for the terminal without extra conversion

use serde::Serialize;

use crate::coverage::GapReport;
use crate::period::YearMonth;

/// Contract file frequency, encoded as the filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Day,
    Hour,
}

impl Frequency {
    pub const ALL: [Frequency; 2] = [Frequency::Day, Frequency::Hour];

    /// Filename prefix and human-readable label (they coincide).
    pub fn display_name(self) -> &'static str {
        match self {
            Frequency::Day => "Day",
            Frequency::Hour => "Hour",
        }
    }

    /// Map a filename prefix token back to a frequency.
    pub fn from_prefix(prefix: &str) -> Option<Frequency> {
        match prefix {
            "Day" => Some(Frequency::Day),
            "Hour" => Some(Frequency::Hour),
            _ => None,
        }
    }
}

/// Audit of one instrument/frequency series.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesAudit {
    pub frequency: Frequency,
    /// Observed contracts, ascending and deduplicated.
    pub contracts: Vec<YearMonth>,
    pub report: GapReport,
}

impl SeriesAudit {
    pub fn start(&self) -> Option<YearMonth> {
        self.contracts.first().copied()
    }

    pub fn end(&self) -> Option<YearMonth> {
        self.contracts.last().copied()
    }
}

/// Full audit for one instrument across all frequencies.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentAudit {
    /// The instrument name as it appears on disk (matching is
    /// case-insensitive, reporting preserves the stored casing).
    pub instrument: String,
    pub series: Vec<SeriesAudit>,
}
