//! Multi-file aggregation
//!
//! Validates a yearly file set by name, parses each file, and merges the
//! results into one time-sorted stream with a fresh summary.
//!
//! Naming errors abort before any file is opened. After that, failures are
//! isolated per file: a file that cannot be parsed is logged and listed in
//! `stats.files_skipped`, and its siblings are still merged.

use crate::core::batch_parser::BatchParser;
use crate::core::naming::validate_yearly_structure;
use crate::types::{ImportError, ParseStats, ProcessingResult, SkippedFile};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Parse outcome of a single file in a set
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<ProcessingResult, ImportError>,
}

/// Sequential multi-file aggregator
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    parser: BatchParser,
    cancel: Option<CancellationToken>,
}

impl Aggregator {
    pub fn new(parser: BatchParser) -> Self {
        Self {
            parser,
            cancel: None,
        }
    }

    /// Stop between files once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Validate, parse and merge a yearly file set
    ///
    /// # Errors
    ///
    /// - Naming errors from [`validate_yearly_structure`]
    /// - `Cancelled` if the cancellation token fires before a file starts
    pub fn aggregate(&self, paths: &[PathBuf]) -> Result<ProcessingResult, ImportError> {
        let files = validate_yearly_structure(paths)?;

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            if is_cancelled(self.cancel.as_ref()) {
                return Err(ImportError::Cancelled);
            }

            let result = self.parser.parse_file(&file.path);
            outcomes.push(FileOutcome {
                path: file.path,
                result,
            });
        }

        Ok(merge_outcomes(outcomes))
    }
}

pub(crate) fn is_cancelled(token: Option<&CancellationToken>) -> bool {
    token.is_some_and(CancellationToken::is_cancelled)
}

/// Merge per-file outcomes into one result
///
/// Must only run once every file has finished. Transactions are concatenated
/// in outcome order and then stably re-sorted, so equal timestamps keep file
/// order. The summary is recomputed over the merged set.
pub fn merge_outcomes(outcomes: Vec<FileOutcome>) -> ProcessingResult {
    let mut transactions = Vec::new();
    let mut stats = ParseStats::default();

    for outcome in outcomes {
        match outcome.result {
            Ok(result) => {
                transactions.extend(result.transactions);
                stats.absorb(result.stats);
            }
            Err(e) => {
                warn!(path = %outcome.path.display(), "Skipping file: {}", e);
                stats.files_skipped.push(SkippedFile {
                    path: outcome.path,
                    reason: e.to_string(),
                });
            }
        }
    }

    let result = ProcessingResult::new(transactions, stats);
    info!(
        transactions = result.summary.transaction_count,
        tickers = result.summary.unique_tickers,
        files = result.stats.files_parsed,
        skipped_files = result.stats.files_skipped.len(),
        skipped_rows = result.stats.rows_skipped,
        "Merged export files"
    );

    result
}
