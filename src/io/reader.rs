//! Whole-file CSV reading
//!
//! Export files are read fully into memory and split into raw rows before any
//! decoding starts. The CSV reader runs without header handling and in
//! flexible mode so that rows of any length reach the normalizer untouched.

use crate::io::normalizer::RawRow;
use crate::types::ImportError;
use csv::{Position, ReaderBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Read a whole export file into memory
///
/// # Errors
///
/// - `FileNotFound` if the path does not exist
/// - `Io` for any other read failure, including invalid UTF-8
pub fn read_file(path: &Path) -> Result<String, ImportError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ImportError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ImportError::Io {
            message: format!("Failed to read '{}': {}", path.display(), e),
        },
    })
}

/// One CSV record together with the physical line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based line of the record's first byte
    pub line: u64,
    pub cells: RawRow,
}

/// Split CSV text into raw rows, header included
///
/// A leading byte order mark is dropped. Blank lines are skipped by the CSV
/// reader but still count towards the line numbers, as do line breaks inside
/// quoted cells.
pub fn read_rows(content: &str, delimiter: u8) -> Result<Vec<SourceRow>, ImportError> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    reader
        .records()
        .enumerate()
        .map(|(index, record)| -> Result<SourceRow, ImportError> {
            let record = record?;
            let line = record
                .position()
                .map(|position| start_line(content.as_bytes(), position))
                .unwrap_or(index as u64 + 1);

            Ok(SourceRow {
                line,
                cells: record.iter().map(str::to_string).collect(),
            })
        })
        .collect()
}

/// Line of the first byte of a record
///
/// A record's position may point at the terminators in front of it (the end
/// of the previous record, or skipped blank lines); those are stepped over.
fn start_line(content: &[u8], position: &Position) -> u64 {
    let skipped = content
        .get(position.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|byte| matches!(byte, b'\r' | b'\n'))
        .filter(|byte| **byte == b'\n')
        .count();

    position.line() + skipped as u64
}
