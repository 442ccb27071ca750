//! Shared audit pipeline used by the one-shot and interactive front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! scan -> sort/dedup -> gap inference -> per-frequency audit
//!
//! The front-ends can then focus on presentation (printing vs exporting).

use std::path::Path;

use crate::coverage;
use crate::domain::{Frequency, InstrumentAudit, SeriesAudit};
use crate::error::AppError;
use crate::io::scan;

/// Audit one instrument across all frequencies.
///
/// Returns `None` when no contract file in the directory matches the
/// instrument (case-insensitively). The scanner already sorts and
/// deduplicates each series, which is the precondition `infer` relies on.
pub fn run_audit(data_dir: &Path, instrument: &str) -> Result<Option<InstrumentAudit>, AppError> {
    let scanned = scan::collect_contracts(data_dir, instrument)?;
    let Some(actual_name) = scanned.actual_name.clone() else {
        return Ok(None);
    };

    let mut series = Vec::with_capacity(Frequency::ALL.len());
    for frequency in Frequency::ALL {
        let contracts = scanned.series(frequency).to_vec();
        let report = coverage::infer(&contracts);
        series.push(SeriesAudit {
            frequency,
            contracts,
            report,
        });
    }

    Ok(Some(InstrumentAudit {
        instrument: actual_name,
        series,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::YearMonth;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn audits_both_frequencies() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "Day_GOLD_20240100.csv",
            "Day_GOLD_20240200.csv",
            "Day_GOLD_20240400.csv",
            "Hour_GOLD_20240100.csv",
        ] {
            touch(dir.path(), name);
        }

        let audit = run_audit(dir.path(), "gold").unwrap().unwrap();
        assert_eq!(audit.instrument, "GOLD");
        assert_eq!(audit.series.len(), 2);

        let day = &audit.series[0];
        assert_eq!(day.frequency, Frequency::Day);
        assert_eq!(day.report.expected_gap, 1);
        assert_eq!(day.report.missing, vec![YearMonth(202403)]);

        let hour = &audit.series[1];
        assert_eq!(hour.frequency, Frequency::Hour);
        assert_eq!(hour.contracts, vec![YearMonth(202401)]);
        assert_eq!(hour.report.expected_gap, 0);
        assert!(hour.report.missing.is_empty());
    }

    #[test]
    fn unknown_instrument_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Day_GOLD_20240100.csv");

        assert!(run_audit(dir.path(), "COPPER").unwrap().is_none());
    }

    #[test]
    fn audit_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "Day_ES_20240300.csv",
            "Day_ES_20240600.csv",
            "Day_ES_20241200.csv",
        ] {
            touch(dir.path(), name);
        }

        let a = run_audit(dir.path(), "ES").unwrap().unwrap();
        let b = run_audit(dir.path(), "ES").unwrap().unwrap();
        assert_eq!(a.series[0].report, b.series[0].report);
        assert_eq!(a.series[0].contracts, b.series[0].contracts);
    }
}
