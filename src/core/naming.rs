//! Yearly file-set naming convention
//!
//! Multi-year imports are split into one export per calendar year, named
//! `from_<YYYY-MM-DD>_to_<YYYY-MM-DD>_<tag>.csv`. A set is valid when every
//! name follows the pattern, each declared range is a real range inside a
//! single year, and no year is claimed twice.
//!
//! Validation only looks at names; no file content is read.

use crate::types::ImportError;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static FILE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^from_([0-9]{4}-[0-9]{2}-[0-9]{2})_to_([0-9]{4}-[0-9]{2}-[0-9]{2})_(.+)\.csv$")
        .expect("hardcoded regex should be valid")
});

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An export file whose name declares a single-year range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyFile {
    pub path: PathBuf,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Free-form suffix after the dates, e.g. an account identifier
    pub tag: String,
}

impl YearlyFile {
    pub fn year(&self) -> i32 {
        self.start.year()
    }
}

/// Parse the range declared by one file name
///
/// Only the final path component is considered.
///
/// # Errors
///
/// - `FilenameConvention` if the name does not match the pattern
/// - `DateRange` if a date is not a calendar date, the start is after the
///   end, or the range crosses a year boundary
pub fn parse_file_name(path: &Path) -> Result<YearlyFile, ImportError> {
    let name = display_name(path);
    let captures = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| FILE_NAME_PATTERN.captures(n))
        .ok_or_else(|| ImportError::FilenameConvention { name: name.clone() })?;

    let start = parse_date(&name, "start", &captures[1])?;
    let end = parse_date(&name, "end", &captures[2])?;

    if start > end {
        return Err(ImportError::date_range(
            &name,
            format!("start {} is after end {}", start, end),
        ));
    }
    if start.year() != end.year() {
        return Err(ImportError::date_range(
            &name,
            format!("range spans {} and {}", start.year(), end.year()),
        ));
    }

    Ok(YearlyFile {
        path: path.to_path_buf(),
        start,
        end,
        tag: captures[3].to_string(),
    })
}

/// Validate a whole file set, in order
///
/// Fails on the first violation. On success, files are returned in input
/// order.
///
/// # Errors
///
/// Any error of [`parse_file_name`], or `DuplicateYear` naming both files
/// when a year appears twice.
pub fn validate_yearly_structure(paths: &[PathBuf]) -> Result<Vec<YearlyFile>, ImportError> {
    let mut years: HashMap<i32, String> = HashMap::new();
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let file = parse_file_name(path)?;
        let name = display_name(path);

        if let Some(first) = years.get(&file.year()) {
            return Err(ImportError::DuplicateYear {
                year: file.year(),
                first: first.clone(),
                second: name,
            });
        }

        years.insert(file.year(), name);
        files.push(file);
    }

    Ok(files)
}

fn parse_date(name: &str, which: &str, text: &str) -> Result<NaiveDate, ImportError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ImportError::date_range(name, format!("invalid {} date '{}'", which, text)))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
