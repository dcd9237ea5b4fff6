//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: the decoded transaction record and its action tag
//! - `result`: processing result, summary, options and counters
//! - `error`: error types for the parser

pub mod error;
pub mod result;
pub mod transaction;

pub use error::ImportError;
pub use result::{
    DateRange, ParseStats, ProcessingOptions, ProcessingResult, ProcessingSummary, SkippedFile,
    TaxCalculationResult, TaxMethod,
};
pub use transaction::{Action, NumericTarget, TextTarget, TransactionRecord, TIME_OUTPUT_FORMAT};
