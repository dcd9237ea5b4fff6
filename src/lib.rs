//! Broker Export Parser Library
//! # Overview
//!
//! This library decodes CSV transaction exports from a retail brokerage into a
//! normalized, time-sorted stream of [`TransactionRecord`]s. The brokerage has
//! shipped three layouts over time (22, 23 and 27 columns); all of them are
//! accepted and mapped onto the same record shape.
//!
//! # Architecture
//!
//! - [`types`] - Records, results, statistics and the error type
//! - [`io`] - Per-row decoding:
//!   - [`io::schema`] - Header validation and format detection
//!   - [`io::normalizer`] - Row-length repair
//!   - [`io::fields`] - Column lookup and optional field extraction
//!   - [`io::decoder`] - Row to record decoding
//!   - [`io::csv_format`] - Normalized CSV output
//! - [`core`] - File-level and set-level processing:
//!   - [`core::batch_parser`] - One file, with per-row error isolation
//!   - [`core::naming`] - Yearly file naming convention
//!   - [`core::aggregator`] - Merge of a yearly file set
//! - [`strategy`] - Sequential and concurrent processing of a file set
//! - [`cli`] - CLI argument parsing and log setup
//!
//! # Error Handling
//!
//! Structural problems (empty input, bad header, bad file names) are returned
//! as [`ImportError`]. Row-level problems are logged and the row is skipped;
//! file-level problems inside a set are logged and the file is skipped.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{Aggregator, BatchParser, ParserConfig};
pub use io::write_transactions_csv;
pub use types::{
    Action, DateRange, ImportError, ParseStats, ProcessingResult, ProcessingSummary,
    TransactionRecord,
};
