//! Error types for the brokerage export parser
//!
//! This module defines every error that can surface while importing brokerage
//! CSV exports. Errors are descriptive enough to be shown directly on the CLI.
//!
//! # Error Categories
//!
//! - **Batch errors**: empty input, missing mandatory columns, unknown column
//!   count. These abort the parse of a whole file.
//! - **Row errors**: severe field-count mismatch, missing required values,
//!   unparseable time or numeric text. The row is skipped and parsing continues.
//! - **Naming errors**: a multi-file set violates the yearly filename
//!   convention. These abort an aggregation before any file is read.
//! - **I/O errors**: file not found, unreadable content, CSV tokenisation.

use thiserror::Error;

/// Main error type for the brokerage export parser
///
/// Each variant carries enough context to locate the offending file, row or
/// column without consulting the logs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    /// The input contained no rows at all, not even a header
    #[error("Input is empty")]
    EmptyInput,

    /// The input contained a header but no data rows
    #[error("Input contains a header but no data rows")]
    NoDataRows,

    /// A mandatory column is absent from the header
    ///
    /// Column names are compared after trimming, case-sensitively.
    #[error("Header is missing mandatory column '{column}'")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// The header has a column count that matches no known export format
    #[error("Header has {count} columns, expected one of 22, 23 or 27")]
    InvalidColumnCount {
        /// Number of columns found in the header
        count: usize,
    },

    /// A data row's field count is too far from the header's to be repaired
    ///
    /// This is a row-level error - the row is skipped.
    #[error("Severe field count mismatch: expected {expected} fields, found {actual}")]
    SevereMismatch {
        /// Header column count
        expected: usize,
        /// Row field count
        actual: usize,
    },

    /// A required column is absent or empty in a data row
    #[error("Required field '{column}' is missing or empty")]
    RequiredFieldMissing {
        /// Name of the required column
        column: String,
    },

    /// The time value matches none of the accepted formats
    #[error("Invalid time '{value}': expected 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DDTHH:MM:SS'")]
    TimeParse {
        /// Raw time text
        value: String,
    },

    /// A numeric column contains text that is neither a number nor a sentinel
    #[error("Invalid numeric value '{value}' in column '{column}'")]
    FieldParse {
        /// Name of the numeric column
        column: String,
        /// Raw cell text
        value: String,
    },

    /// A row-level failure, tagged with the physical line it came from
    ///
    /// Line numbers are 1-based and count the header as line 1.
    #[error("Line {line}: {source}")]
    Row {
        /// Physical line number of the failing row
        line: u64,
        /// The underlying row failure
        #[source]
        source: Box<ImportError>,
    },

    /// A file name does not follow `from_<date>_to_<date>_<tag>.csv`
    #[error("File name '{name}' does not match 'from_YYYY-MM-DD_to_YYYY-MM-DD_<tag>.csv'")]
    FilenameConvention {
        /// Offending file name
        name: String,
    },

    /// The date range declared by a file name is invalid
    #[error("Invalid date range in '{name}': {reason}")]
    DateRange {
        /// Offending file name
        name: String,
        /// What is wrong with the range
        reason: String,
    },

    /// Two files of one set declare the same calendar year
    #[error("Year {year} is covered by both '{first}' and '{second}'")]
    DuplicateYear {
        /// The duplicated year
        year: i32,
        /// File that claimed the year first
        first: String,
        /// File that claimed it again
        second: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// The CSV tokenizer rejected the input
    #[error("CSV error{}: {message}", line_suffix(.line))]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the tokenizer error
        message: String,
    },

    /// A cooperative cancellation signal stopped an aggregation
    #[error("Import cancelled")]
    Cancelled,
}

impl From<std::io::Error> for ImportError {
    fn from(error: std::io::Error) -> Self {
        ImportError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        ImportError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

// Helper functions for creating common errors

impl ImportError {
    /// Create a MissingColumn error
    pub fn missing_column(column: &str) -> Self {
        ImportError::MissingColumn {
            column: column.to_string(),
        }
    }

    /// Create a RequiredFieldMissing error
    pub fn required_field_missing(column: &str) -> Self {
        ImportError::RequiredFieldMissing {
            column: column.to_string(),
        }
    }

    /// Create a TimeParse error
    pub fn time_parse(value: &str) -> Self {
        ImportError::TimeParse {
            value: value.to_string(),
        }
    }

    /// Create a FieldParse error
    pub fn field_parse(column: &str, value: &str) -> Self {
        ImportError::FieldParse {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    /// Wrap a row failure with its line number
    pub fn at_line(self, line: u64) -> Self {
        ImportError::Row {
            line,
            source: Box::new(self),
        }
    }

    /// Create a DateRange error
    pub fn date_range(name: &str, reason: impl Into<String>) -> Self {
        ImportError::DateRange {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// The innermost error, looking through `Row` wrappers
    pub fn root_cause(&self) -> &ImportError {
        match self {
            ImportError::Row { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
