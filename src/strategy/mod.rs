//! Processing strategy module for multi-file imports
//!
//! This module defines the Strategy pattern for importing a yearly file set:
//! name validation, per-file parsing, and the final merge. Different
//! implementations (sequential, concurrent) can be selected at runtime and
//! produce identical results for identical input.

use crate::cli::StrategyType;
use crate::core::ParserConfig;
use crate::types::{ImportError, ProcessingResult};
use std::path::PathBuf;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete import pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Import a yearly file set
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file names violate the yearly naming convention
    /// - The import was cancelled
    /// - The runtime could not be started (concurrent strategy only)
    ///
    /// Files that fail to parse do not cause an error; they are logged and
    /// listed in the result's `stats.files_skipped`.
    fn process(&self, inputs: &[PathBuf]) -> Result<ProcessingResult, ImportError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - Sequential or concurrent file processing
/// * `parser_config` - Per-file parsing configuration
/// * `config` - Optional concurrency configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    parser_config: ParserConfig,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(parser_config)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(parser_config, config))
        }
    }
}
