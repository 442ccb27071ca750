//! Vendor CSV column normalization.
//!
//! Barchart-shaped exports name columns inconsistently (`Latest`, `Settle`,
//! `tradeTime`, ...). This module rewrites such a file into the canonical
//! schema `Time,Open,High,Low,Close,Volume`:
//!
//! - map each canonical column to the first matching vendor alias
//! - fail if a required price/volume column is still missing
//! - project rows onto the canonical columns, dropping everything else
//!
//! Values pass through unmodified; this is purely a column-level rewrite.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::error::AppError;

/// Canonical column -> accepted vendor aliases, in canonical output order.
/// The first alias present in the input wins.
const COLUMN_ALIASES: &[(&str, &[&str])] = &[
    ("Time", &["Time", "tradeTime", "Date"]),
    ("Open", &["Open", "Open Price", "openPrice"]),
    ("High", &["High", "High Price", "highPrice"]),
    ("Low", &["Low", "Low Price", "lowPrice"]),
    ("Close", &["Close", "Last", "Latest", "Settlement", "Settle"]),
    ("Volume", &["Volume", "volume"]),
];

/// Columns that must exist after aliasing. `Time` is tolerated as absent
/// (some exports carry no timestamp column at all).
const REQUIRED: &[&str] = &["Open", "High", "Low", "Close", "Volume"];

/// What a normalization run did, for reporting.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    /// `(vendor name, canonical name)` for every renamed column.
    pub renamed: Vec<(String, String)>,
    /// Canonical columns written, in order.
    pub columns: Vec<String>,
    pub rows: usize,
    pub output: PathBuf,
}

/// Rewrite `input` into the canonical schema. Writes to `output` when given,
/// otherwise replaces `input` atomically.
pub fn normalize_file(input: &Path, output: Option<&Path>) -> Result<NormalizeOutcome, AppError> {
    let file = File::open(input).map_err(|e| {
        AppError::usage(format!("Failed to open CSV '{}': {e}", input.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV headers: {e}")))?
        .clone();

    // (canonical name, source column index) for every resolvable column.
    let mut selected: Vec<(&'static str, usize)> = Vec::new();
    let mut renamed = Vec::new();
    for (canonical, aliases) in COLUMN_ALIASES {
        let Some((alias, idx)) = find_alias(&headers, aliases) else {
            continue;
        };
        selected.push((canonical, idx));
        if alias != *canonical {
            renamed.push((alias.to_string(), canonical.to_string()));
        }
    }

    let missing: Vec<&str> = REQUIRED
        .iter()
        .copied()
        .filter(|req| !selected.iter().any(|(canonical, _)| canonical == req))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::usage(format!(
            "Missing required columns after normalization: {}. Available: {}",
            missing.join(", "),
            headers.iter().collect::<Vec<_>>().join(", ")
        )));
    }

    let columns: Vec<String> = selected.iter().map(|(c, _)| c.to_string()).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&columns)
        .map_err(|e| AppError::processing(format!("Failed to write header: {e}")))?;

    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| AppError::usage(format!("CSV parse error: {e}")))?;
        let projected: Vec<&str> = selected
            .iter()
            .map(|&(_, idx)| record.get(idx).unwrap_or(""))
            .collect();
        writer
            .write_record(&projected)
            .map_err(|e| AppError::processing(format!("Failed to write row: {e}")))?;
        rows += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::processing(format!("Failed to flush CSV output: {e}")))?;

    let output_path = write_output(input, output, &bytes)?;

    Ok(NormalizeOutcome {
        renamed,
        columns,
        rows,
        output: output_path,
    })
}

fn find_alias<'a>(headers: &'a StringRecord, aliases: &[&str]) -> Option<(&'a str, usize)> {
    for alias in aliases {
        for (idx, name) in headers.iter().enumerate() {
            let name = name.trim().trim_start_matches('\u{feff}');
            if name == *alias {
                return Some((name, idx));
            }
        }
    }
    None
}

fn write_output(input: &Path, output: Option<&Path>, bytes: &[u8]) -> Result<PathBuf, AppError> {
    match output {
        Some(path) => {
            std::fs::write(path, bytes).map_err(|e| {
                AppError::processing(format!("Failed to write '{}': {e}", path.display()))
            })?;
            Ok(path.to_path_buf())
        }
        None => {
            let parent = input.parent().unwrap_or_else(|| Path::new("."));
            let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
                AppError::processing(format!("Failed to create temp file: {e}"))
            })?;
            tmp.write_all(bytes)
                .map_err(|e| AppError::processing(format!("Failed to write temp file: {e}")))?;
            tmp.persist(input)
                .map_err(|e| AppError::processing(format!("Failed to replace input file: {e}")))?;
            Ok(input.to_path_buf())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn renames_aliases_and_projects_columns() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vendor.csv");
        fs::write(
            &input,
            "tradeTime,Open,High,Low,Latest,Volume,Extra\n2024-01-02,1,2,0.5,1.5,100,x\n",
        )
        .unwrap();
        let output = dir.path().join("canonical.csv");

        let outcome = normalize_file(&input, Some(&output)).unwrap();
        assert_eq!(outcome.rows, 1);
        assert_eq!(
            outcome.columns,
            vec!["Time", "Open", "High", "Low", "Close", "Volume"]
        );
        assert!(outcome
            .renamed
            .contains(&("tradeTime".to_string(), "Time".to_string())));
        assert!(outcome
            .renamed
            .contains(&("Latest".to_string(), "Close".to_string())));

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Time,Open,High,Low,Close,Volume\n2024-01-02,1,2,0.5,1.5,100\n"
        );
    }

    #[test]
    fn first_alias_wins() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vendor.csv");
        // Both `Close` and `Latest` present: the canonical name itself is the
        // first alias, so `Latest` is dropped with the other extras.
        fs::write(
            &input,
            "Time,Open,High,Low,Close,Latest,Volume\nt,1,2,3,4,9,5\n",
        )
        .unwrap();
        let output = dir.path().join("out.csv");

        normalize_file(&input, Some(&output)).unwrap();
        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "Time,Open,High,Low,Close,Volume\nt,1,2,3,4,5\n");
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vendor.csv");
        fs::write(&input, "Time,Open,High,Low,Volume\nt,1,2,3,4\n").unwrap();

        let err = normalize_file(&input, None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Close"));
    }

    #[test]
    fn in_place_rewrite_replaces_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vendor.csv");
        fs::write(&input, "Date,Open,High,Low,Settle,volume\nd,1,2,3,4,5\n").unwrap();

        let outcome = normalize_file(&input, None).unwrap();
        assert_eq!(outcome.output, input);
        let written = fs::read_to_string(&input).unwrap();
        assert_eq!(written, "Time,Open,High,Low,Close,Volume\nd,1,2,3,4,5\n");
    }
}
