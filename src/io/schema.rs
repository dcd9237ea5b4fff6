//! Header validation and export format detection
//!
//! The brokerage has shipped three incompatible export layouts over the years.
//! They are told apart by column count only; field lookup is always by name,
//! so column order does not matter.

use crate::io::fields::columns;
use crate::types::ImportError;

/// Columns every export format must carry, matched exactly after trimming
pub const MANDATORY_COLUMNS: [&str; 5] = [
    columns::ACTION,
    columns::TIME,
    columns::ISIN,
    columns::TICKER,
    columns::NAME,
];

/// Known export layouts, keyed by column count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// Oldest layout, without realized result or conversion amounts
    Columns22,
    Columns23,
    /// Current layout with result and currency conversion columns
    Columns27,
}

impl FormatVersion {
    pub fn from_column_count(count: usize) -> Option<Self> {
        match count {
            22 => Some(FormatVersion::Columns22),
            23 => Some(FormatVersion::Columns23),
            27 => Some(FormatVersion::Columns27),
            _ => None,
        }
    }

    pub fn column_count(self) -> usize {
        match self {
            FormatVersion::Columns22 => 22,
            FormatVersion::Columns23 => 23,
            FormatVersion::Columns27 => 27,
        }
    }
}

/// A validated header row
///
/// Shared read-only by every row decode of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    version: FormatVersion,
}

impl Header {
    /// Validate a header row and detect its format version
    ///
    /// Mandatory columns are checked first, then the column count.
    ///
    /// # Errors
    ///
    /// - `MissingColumn` naming the first mandatory column not found
    /// - `InvalidColumnCount` if the count is not 22, 23 or 27
    pub fn parse(row: &[String]) -> Result<Self, ImportError> {
        let version = validate_header(row)?;

        Ok(Header {
            columns: row.iter().map(|c| c.trim().to_string()).collect(),
            version,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Check a header row without keeping it
pub fn validate_header(row: &[String]) -> Result<FormatVersion, ImportError> {
    for mandatory in MANDATORY_COLUMNS {
        if !row.iter().any(|column| column.trim() == mandatory) {
            return Err(ImportError::missing_column(mandatory));
        }
    }

    FormatVersion::from_column_count(row.len())
        .ok_or(ImportError::InvalidColumnCount { count: row.len() })
}
