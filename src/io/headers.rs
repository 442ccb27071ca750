//! CSV header maintenance for downloaded contract files.
//!
//! Some vendor exports name the settlement column `Latest` instead of
//! `Close`. Two remedies are supported:
//!
//! - rewrite the header in place (`Latest` -> `Close`), touching nothing
//!   else in the file
//! - list (and, after confirmation, delete) every file still carrying a
//!   `Latest` column
//!
//! Files are decoded as UTF-8 first, falling back to Latin-1, and rewritten
//! atomically via a temp file in the same directory.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::io::scan::find_prefixed_files;

/// The vendor column we rename away.
const BAD_COLUMN: &str = "Latest";

/// Its canonical replacement.
const GOOD_COLUMN: &str = "Close";

/// Text encoding the header line was decoded with.
///
/// Latin-1 maps every byte to a char, so decoding as a whole cannot fail;
/// what matters is re-encoding the rewritten header with the same encoding
/// so the rest of the file stays byte-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderEncoding {
    Utf8,
    Latin1,
}

fn decode_header(bytes: &[u8]) -> (String, HeaderEncoding) {
    match std::str::from_utf8(bytes) {
        Ok(s) => (s.to_string(), HeaderEncoding::Utf8),
        Err(_) => (
            bytes.iter().map(|&b| b as char).collect(),
            HeaderEncoding::Latin1,
        ),
    }
}

fn encode_header(s: &str, encoding: HeaderEncoding) -> Vec<u8> {
    match encoding {
        HeaderEncoding::Utf8 => s.as_bytes().to_vec(),
        // Chars originated from single bytes (plus ASCII replacements), so
        // the cast back is lossless.
        HeaderEncoding::Latin1 => s.chars().map(|c| c as u8).collect(),
    }
}

/// Read the first line of a file (header row), without the line terminator.
pub fn read_header_line(path: &Path) -> Result<String, String> {
    let file = File::open(path).map_err(|e| format!("open failed: {e}"))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_until(b'\n', &mut bytes)
        .map_err(|e| format!("read failed: {e}"))?;
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    let (line, _) = decode_header(&bytes);
    Ok(line)
}

/// Does this header row contain a column named exactly `Latest`?
pub fn header_has_latest(header_line: &str) -> bool {
    header_cells(header_line).any(|cell| cell == BAD_COLUMN)
}

fn header_cells(header_line: &str) -> impl Iterator<Item = &str> {
    header_line
        .split(',')
        .map(|cell| cell.trim().trim_start_matches('\u{feff}'))
}

/// Rename `Latest` to `Close` in the header row, leaving every other byte of
/// the file untouched. Returns `Ok(true)` if the file was modified,
/// `Ok(false)` if there was nothing to do.
pub fn rewrite_latest_to_close(path: &Path) -> Result<bool, String> {
    let bytes = fs::read(path).map_err(|e| format!("read failed: {e}"))?;
    if bytes.is_empty() {
        return Ok(false);
    }

    // Split off the header line, keeping its terminator with the body of
    // the file so line-ending style survives the rewrite.
    let header_len = bytes
        .iter()
        .position(|&b| b == b'\n')
        .map(|idx| idx + 1)
        .unwrap_or(bytes.len());
    let (header_bytes, rest) = bytes.split_at(header_len);

    let mut header_end = header_bytes.len();
    while header_end > 0 && matches!(header_bytes[header_end - 1], b'\n' | b'\r') {
        header_end -= 1;
    }
    let terminator = &header_bytes[header_end..];

    let (header_line, encoding) = decode_header(&header_bytes[..header_end]);
    if !header_has_latest(&header_line) {
        return Ok(false);
    }

    let new_header: Vec<&str> = header_line
        .split(',')
        .map(|cell| {
            if cell.trim().trim_start_matches('\u{feff}') == BAD_COLUMN {
                GOOD_COLUMN
            } else {
                cell
            }
        })
        .collect();
    let new_line = new_header.join(",");

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .map_err(|e| format!("temp file creation failed: {e}"))?;
    tmp.write_all(&encode_header(&new_line, encoding))
        .and_then(|()| tmp.write_all(terminator))
        .and_then(|()| tmp.write_all(rest))
        .map_err(|e| format!("temp file write failed: {e}"))?;
    tmp.persist(path)
        .map_err(|e| format!("atomic replace failed: {e}"))?;

    Ok(true)
}

/// Result of scanning `Day_*`/`Hour_*` CSVs for a `Latest` header column.
#[derive(Debug, Default)]
pub struct HeaderScan {
    /// Total candidate files examined (flagged + clean + unreadable).
    pub scanned: usize,
    /// Files whose header carries a `Latest` column.
    pub flagged: Vec<PathBuf>,
    /// Files that could not be read, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Scan `Day_*`/`Hour_*` CSVs and split them into files whose header carries
/// a `Latest` column and files that could not be read.
pub fn find_latest_header_files(data_dir: &Path) -> Result<HeaderScan, AppError> {
    let mut out = HeaderScan::default();

    for path in find_prefixed_files(data_dir)? {
        out.scanned += 1;
        match read_header_line(&path) {
            Ok(line) if header_has_latest(&line) => out.flagged.push(path),
            Ok(_) => {}
            Err(e) => out.unreadable.push((path, e)),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn detects_latest_column() {
        assert!(header_has_latest("Time,Open,High,Low,Latest,Volume"));
        assert!(header_has_latest("Time, Open, Latest "));
        assert!(!header_has_latest("Time,Open,High,Low,Close,Volume"));
        // Substrings must not match.
        assert!(!header_has_latest("Time,LatestPrice,Close"));
    }

    #[test]
    fn rewrites_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "Day_GOLD_20240100.csv",
            b"Time,Open,High,Low,Latest,Volume\r\n1,2,3,4,5,6\r\n",
        );

        assert!(rewrite_latest_to_close(&path).unwrap());
        let after = fs::read(&path).unwrap();
        assert_eq!(
            after,
            b"Time,Open,High,Low,Close,Volume\r\n1,2,3,4,5,6\r\n"
        );

        // Second pass finds nothing to do.
        assert!(!rewrite_latest_to_close(&path).unwrap());
    }

    #[test]
    fn leaves_clean_files_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let contents: &[u8] = b"Time,Open,High,Low,Close,Volume\n1,2,3,4,5,6\n";
        let path = write_file(dir.path(), "Day_GOLD_20240100.csv", contents);

        assert!(!rewrite_latest_to_close(&path).unwrap());
        assert_eq!(fs::read(&path).unwrap(), contents);
    }

    #[test]
    fn handles_latin1_headers() {
        let dir = tempfile::tempdir().unwrap();
        // 0xE9 is 'é' in Latin-1 and invalid as standalone UTF-8.
        let mut contents = b"Time,Open,High,Low,Latest,Volume".to_vec();
        contents[1] = 0xE9;
        contents.extend_from_slice(b"\n1,2,3,4,5,6\n");
        let path = write_file(dir.path(), "Hour_GOLD_20240100.csv", &contents);

        assert!(rewrite_latest_to_close(&path).unwrap());
        let after = fs::read(&path).unwrap();
        // Close replaced Latest; the Latin-1 byte survives untouched.
        assert_eq!(after[1], 0xE9);
        let (line, _) = super::decode_header(&after[..after.iter().position(|&b| b == b'\n').unwrap()]);
        assert!(line.contains("Close"));
        assert!(!line.contains("Latest"));
    }

    #[test]
    fn header_only_file_without_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "Day_X_20240100.csv", b"Open,Latest");

        assert!(rewrite_latest_to_close(&path).unwrap());
        assert_eq!(fs::read(&path).unwrap(), b"Open,Close");
    }

    #[test]
    fn finds_flagged_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "Day_A_20240100.csv",
            b"Time,Latest\n1,2\n",
        );
        write_file(
            dir.path(),
            "Hour_B_20240100.csv",
            b"Time,Close\n1,2\n",
        );
        write_file(dir.path(), "unrelated.csv", b"Time,Latest\n1,2\n");

        let scan = find_latest_header_files(dir.path()).unwrap();
        // `unrelated.csv` lacks the Day_/Hour_ prefix and is never a candidate.
        assert_eq!(scan.scanned, 2);
        assert_eq!(scan.flagged.len(), 1);
        assert!(scan.flagged[0].ends_with("Day_A_20240100.csv"));
        assert!(scan.unreadable.is_empty());
    }
}
