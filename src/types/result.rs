//! Processing result types
//!
//! A `ProcessingResult` is what the parser hands to downstream consumers (tax
//! calculation, presentation). It owns the sorted transaction stream, a
//! summary derived from it, and counters for everything that was skipped.

use crate::types::TransactionRecord;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::PathBuf;

/// Inclusive time range covered by a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Aggregate figures over a transaction set
///
/// Always computed from scratch over the full set; never updated
/// incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Number of accepted transactions
    pub transaction_count: usize,

    /// Distinct ticker symbols, compared case-sensitively
    pub unique_tickers: usize,

    /// Earliest and latest transaction time, `None` for an empty set
    pub date_range: Option<DateRange>,
}

impl ProcessingSummary {
    /// Compute the summary of a transaction slice
    pub fn compute(transactions: &[TransactionRecord]) -> Self {
        let unique_tickers = transactions
            .iter()
            .filter_map(|t| t.ticker.as_deref())
            .filter(|ticker| !ticker.is_empty())
            .collect::<HashSet<_>>()
            .len();

        let date_range = transactions
            .iter()
            .map(|t| t.time)
            .fold(None, |range: Option<DateRange>, time| match range {
                None => Some(DateRange {
                    start: time,
                    end: time,
                }),
                Some(r) => Some(DateRange {
                    start: r.start.min(time),
                    end: r.end.max(time),
                }),
            });

        ProcessingSummary {
            transaction_count: transactions.len(),
            unique_tickers,
            date_range,
        }
    }
}

/// Lot-matching method requested from the tax layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaxMethod {
    #[default]
    Fifo,
    Lifo,
}

/// Options travelling with a result to the tax layer
///
/// The parser only ever fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub tax_method: TaxMethod,

    /// ISO currency code to report in, `None` for the account currency
    pub base_currency: Option<String>,
}

/// Slot for figures produced by the tax layer
#[derive(Debug, Clone, PartialEq)]
pub struct TaxCalculationResult {
    pub realized_gain: f64,
    pub dividends: f64,
    pub withholding_tax: f64,
    pub currency: String,
}

/// A file that was skipped during aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Counters for rows and files read and skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseStats {
    /// Data rows read, header excluded
    pub rows_read: usize,

    /// Data rows rejected by the decoder
    pub rows_skipped: usize,

    /// Files parsed successfully
    pub files_parsed: usize,

    /// Files rejected as a whole
    pub files_skipped: Vec<SkippedFile>,
}

impl ParseStats {
    /// Fold another set of counters into this one
    pub fn absorb(&mut self, other: ParseStats) {
        self.rows_read += other.rows_read;
        self.rows_skipped += other.rows_skipped;
        self.files_parsed += other.files_parsed;
        self.files_skipped.extend(other.files_skipped);
    }
}

/// The parser's output artifact
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Accepted transactions, ascending by time (stable)
    pub transactions: Vec<TransactionRecord>,

    /// Filled in by the tax layer, always `None` here
    pub tax_results: Option<TaxCalculationResult>,

    pub options: ProcessingOptions,
    pub processed_at: DateTime<Utc>,
    pub summary: ProcessingSummary,
    pub stats: ParseStats,
}

impl ProcessingResult {
    /// Build a result from unsorted transactions
    ///
    /// Sorts stably by time, so records with equal timestamps keep their
    /// input order, then computes the summary.
    pub fn new(mut transactions: Vec<TransactionRecord>, stats: ParseStats) -> Self {
        transactions.sort_by_key(|t| t.time);
        let summary = ProcessingSummary::compute(&transactions);

        ProcessingResult {
            transactions,
            tax_results: None,
            options: ProcessingOptions::default(),
            processed_at: Utc::now(),
            summary,
            stats,
        }
    }
}
