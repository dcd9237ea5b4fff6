//! Sequential processing strategy
//!
//! Parses the files of a set one after another on the calling thread, via the
//! [`Aggregator`]. Row and error-log order is fully deterministic.

use crate::core::{Aggregator, BatchParser, ParserConfig};
use crate::strategy::ProcessingStrategy;
use crate::types::{ImportError, ProcessingResult};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Sequential processing strategy
///
/// # Examples
///
/// ```no_run
/// use broker_export_parser::core::ParserConfig;
/// use broker_export_parser::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::PathBuf;
///
/// let strategy = SyncProcessingStrategy::new(ParserConfig::default());
/// let result = strategy
///     .process(&[PathBuf::from("from_2023-01-01_to_2023-12-31_main.csv")])
///     .expect("Import failed");
/// println!("{} transactions", result.summary.transaction_count);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyncProcessingStrategy {
    aggregator: Aggregator,
}

impl SyncProcessingStrategy {
    pub fn new(parser_config: ParserConfig) -> Self {
        Self {
            aggregator: Aggregator::new(BatchParser::new(parser_config)),
        }
    }

    /// Check `token` before each file and stop once it is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.aggregator = self.aggregator.with_cancellation(token);
        self
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, inputs: &[PathBuf]) -> Result<ProcessingResult, ImportError> {
        self.aggregator.aggregate(inputs)
    }
}
