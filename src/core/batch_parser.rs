//! Batch parsing of a single export file
//!
//! The batch parser validates the header, decodes every data row on its own,
//! and isolates row failures: a bad row is logged and skipped, never fatal.
//! Only an empty input, a header without rows, or an invalid header abort the
//! whole file.
//!
//! # Error Reporting
//!
//! The first `max_reported_errors` row failures are logged individually.
//! Beyond that, failures are only counted, and a single trailing warning gives
//! the total. The count is always available in `ProcessingResult::stats`.

use crate::io::decoder::decode_row;
use crate::io::normalizer::RawRow;
use crate::io::reader::{read_file, read_rows, SourceRow};
use crate::io::schema::Header;
use crate::types::{ImportError, ParseStats, ProcessingResult};
use std::path::Path;
use tracing::{info, warn};

/// Configuration for parsing a single file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Row failures logged individually before switching to counting only
    pub max_reported_errors: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_reported_errors: 10,
        }
    }
}

/// Parser for one brokerage export file
///
/// Holds no state between calls; one instance can parse any number of files,
/// from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct BatchParser {
    config: ParserConfig,
}

impl BatchParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Read and parse one export file
    ///
    /// # Errors
    ///
    /// File-level failures only: the file cannot be read, is empty, has no
    /// data rows, or has an invalid header.
    pub fn parse_file(&self, path: &Path) -> Result<ProcessingResult, ImportError> {
        let content = read_file(path)?;
        let result = self.parse_str(&content)?;

        info!(
            path = %path.display(),
            transactions = result.summary.transaction_count,
            skipped = result.stats.rows_skipped,
            "Parsed export file"
        );

        Ok(result)
    }

    /// Parse CSV text already held in memory
    pub fn parse_str(&self, content: &str) -> Result<ProcessingResult, ImportError> {
        let rows = read_rows(content, self.config.delimiter)?;
        self.parse_source_rows(rows)
    }

    /// Parse a full row set, header first, one row per line
    pub fn parse_rows(&self, rows: Vec<RawRow>) -> Result<ProcessingResult, ImportError> {
        let rows = rows
            .into_iter()
            .zip(1..)
            .map(|(cells, line)| SourceRow { line, cells })
            .collect();

        self.parse_source_rows(rows)
    }

    /// Parse a full row set, header first
    ///
    /// Row errors name each row's own line. Accepted transactions come back
    /// sorted by time; rows with equal times keep their file order.
    pub fn parse_source_rows(&self, rows: Vec<SourceRow>) -> Result<ProcessingResult, ImportError> {
        let mut rows = rows.into_iter();
        let header_row = rows.next().ok_or(ImportError::EmptyInput)?;
        let header = Header::parse(&header_row.cells)?;

        let mut transactions = Vec::with_capacity(rows.len());
        let mut rows_read = 0;
        let mut failures = 0;

        for row in rows {
            rows_read += 1;

            match decode_row(&header, row.cells, row.line) {
                Ok(transaction) => transactions.push(transaction),
                Err(e) => {
                    failures += 1;
                    if failures <= self.config.max_reported_errors {
                        warn!("Skipping row: {}", e);
                    }
                }
            }
        }

        if rows_read == 0 {
            return Err(ImportError::NoDataRows);
        }

        if failures > self.config.max_reported_errors {
            warn!(
                "Skipped {} rows in total ({} not shown individually)",
                failures,
                failures - self.config.max_reported_errors
            );
        }

        let stats = ParseStats {
            rows_read,
            rows_skipped: failures,
            files_parsed: 1,
            files_skipped: Vec::new(),
        };

        Ok(ProcessingResult::new(transactions, stats))
    }
}
