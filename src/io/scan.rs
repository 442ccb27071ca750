//! Data-directory scanning and contract filename parsing.
//!
//! Contract files are named `<Frequency>_<INSTRUMENT>_<YYYYMM>00.csv`, e.g.
//! `Day_GOLD_20240300.csv`. This module turns a directory of such files into
//! clean, sorted per-frequency series for one instrument.
//!
//! Design goals:
//! - **Deterministic behavior** (sorted output, no hidden state)
//! - **Case-insensitive instrument lookup**, preserving on-disk casing
//! - **Separation of concerns**: no gap inference here

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::Frequency;
use crate::error::AppError;
use crate::period::YearMonth;

/// Environment variable consulted when `--data-dir` is not given.
const DATA_DIR_ENV: &str = "CONTRACT_DATA_DIR";

/// Fallback data directory relative to the working directory.
const DEFAULT_DATA_DIR: &str = "data";

/// One parsed contract filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractName {
    pub frequency: Frequency,
    pub instrument: String,
    pub period: YearMonth,
}

/// Contracts collected for one instrument, split by frequency.
#[derive(Debug, Clone, Default)]
pub struct ScannedContracts {
    /// On-disk instrument casing, if any file matched.
    pub actual_name: Option<String>,
    pub day: Vec<YearMonth>,
    pub hour: Vec<YearMonth>,
}

impl ScannedContracts {
    pub fn series(&self, frequency: Frequency) -> &[YearMonth] {
        match frequency {
            Frequency::Day => &self.day,
            Frequency::Hour => &self.hour,
        }
    }

    fn series_mut(&mut self, frequency: Frequency) -> &mut Vec<YearMonth> {
        match frequency {
            Frequency::Day => &mut self.day,
            Frequency::Hour => &mut self.hour,
        }
    }
}

/// Resolve the data directory: explicit flag, then `CONTRACT_DATA_DIR`
/// (a `.env` file is honored), then `./data`.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    dotenvy::dotenv().ok();
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

/// Fail early with a clear message when the data directory is absent.
pub fn ensure_data_dir(dir: &Path) -> Result<(), AppError> {
    if !dir.is_dir() {
        return Err(AppError::usage(format!(
            "Data directory not found: {}",
            dir.display()
        )));
    }
    Ok(())
}

fn contract_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // The `00` before the extension is a literal day-of-month placeholder.
        Regex::new(r"^(Day|Hour)_([A-Za-z0-9_\-]+)_(\d{6})00\.csv$")
            .unwrap_or_else(|e| panic!("invalid contract filename pattern: {e}"))
    })
}

/// Parse one filename into its `(frequency, instrument, period)` triple.
///
/// Returns `None` for anything that does not match the contract pattern
/// exactly; the scanner simply skips such files.
pub fn parse_contract_filename(name: &str) -> Option<ContractName> {
    let caps = contract_pattern().captures(name)?;
    let frequency = Frequency::from_prefix(caps.get(1)?.as_str())?;
    let instrument = caps.get(2)?.as_str().to_string();
    let period = YearMonth(caps.get(3)?.as_str().parse().ok()?);
    Some(ContractName {
        frequency,
        instrument,
        period,
    })
}

/// Collect every contract period for `instrument` (case-insensitive),
/// sorted ascending and deduplicated per frequency.
pub fn collect_contracts(data_dir: &Path, instrument: &str) -> Result<ScannedContracts, AppError> {
    let entries = fs::read_dir(data_dir).map_err(|e| {
        AppError::usage(format!(
            "Failed to read data directory '{}': {e}",
            data_dir.display()
        ))
    })?;

    let mut scanned = ScannedContracts::default();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || !has_csv_extension(&path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(parsed) = parse_contract_filename(name) else {
            continue;
        };

        if parsed.instrument.eq_ignore_ascii_case(instrument) {
            scanned.actual_name = Some(parsed.instrument);
            scanned.series_mut(parsed.frequency).push(parsed.period);
        }
    }

    for frequency in Frequency::ALL {
        let series = scanned.series_mut(frequency);
        series.sort_unstable();
        series.dedup();
    }

    Ok(scanned)
}

/// Every `Day_<instrument>_*` / `Hour_<instrument>_*` CSV path, sorted.
///
/// The instrument prefix match is case-sensitive, matching how the files are
/// produced by the downloader.
pub fn find_instrument_files(data_dir: &Path, instrument: &str) -> Result<Vec<PathBuf>, AppError> {
    let instrument = instrument.trim();
    list_csv_files(data_dir, |name| {
        Frequency::ALL
            .iter()
            .any(|f| name.starts_with(&format!("{}_{instrument}_", f.display_name())))
    })
}

/// Every `Day_*` / `Hour_*` CSV path, sorted.
pub fn find_prefixed_files(data_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    list_csv_files(data_dir, |name| {
        Frequency::ALL
            .iter()
            .any(|f| name.starts_with(&format!("{}_", f.display_name())))
    })
}

fn list_csv_files(
    data_dir: &Path,
    matches: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>, AppError> {
    let entries = fs::read_dir(data_dir).map_err(|e| {
        AppError::usage(format!(
            "Failed to read data directory '{}': {e}",
            data_dir.display()
        ))
    })?;

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || !has_csv_extension(&path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if matches(name) {
            out.push(path);
        }
    }

    out.sort();
    Ok(out)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        == Some(true)
}
