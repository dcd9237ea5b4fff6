//! Core parsing pipeline
//!
//! This module contains the file-level and set-level components:
//! - `batch_parser` - Parses one export file with per-row error isolation
//! - `naming` - Validates the yearly file naming convention
//! - `aggregator` - Parses a validated file set and merges the results

pub mod aggregator;
pub mod batch_parser;
pub mod naming;

pub use aggregator::{merge_outcomes, Aggregator, FileOutcome};
pub use batch_parser::{BatchParser, ParserConfig};
pub use naming::{parse_file_name, validate_yearly_structure, YearlyFile};
