//! Concurrent processing strategy
//!
//! This module parses the files of a yearly set in parallel. Files are
//! independent, so each one is parsed on tokio's blocking pool; the merge runs
//! only after every file has finished.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── validate_yearly_structure (names only, before any read)
//!     ├── BatchConfig (max_concurrent_files)
//!     ├── futures::stream::buffered (bounded fan-out, keeps file order)
//!     │       └── spawn_blocking → BatchParser::parse_file
//!     └── merge_outcomes (barrier: sort + summary)
//! ```
//!
//! Because `buffered` yields results in input order, the merged output is
//! identical to the sequential strategy's.

use crate::core::aggregator::{is_cancelled, merge_outcomes, FileOutcome};
use crate::core::naming::{validate_yearly_structure, YearlyFile};
use crate::core::{BatchParser, ParserConfig};
use crate::strategy::ProcessingStrategy;
use crate::types::{ImportError, ProcessingResult};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Configuration for concurrent file processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Maximum number of files parsed at the same time
    pub max_concurrent_files: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero falls back to the default
    pub fn new(max_concurrent_files: usize) -> Self {
        let default = Self::default();

        let max_concurrent_files = if max_concurrent_files == 0 {
            warn!(
                "Invalid max_concurrent_files ({}), using default ({})",
                max_concurrent_files, default.max_concurrent_files
            );
            default.max_concurrent_files
        } else {
            max_concurrent_files
        };

        Self {
            max_concurrent_files,
        }
    }
}

/// Concurrent processing strategy
///
/// AsyncProcessingStrategy is Send + Sync. It owns no runtime between calls;
/// each `process` call builds a multi-threaded tokio runtime sized by the
/// configuration, so it must not be called from inside another runtime.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    parser: BatchParser,
    config: BatchConfig,
    cancel: Option<CancellationToken>,
}

impl AsyncProcessingStrategy {
    pub fn new(parser_config: ParserConfig, config: BatchConfig) -> Self {
        Self {
            parser: BatchParser::new(parser_config),
            config,
            cancel: None,
        }
    }

    /// Check `token` before each file starts and stop once it is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Files in flight at once; a zero set directly on the config counts as one
    fn concurrency(&self) -> usize {
        self.config.max_concurrent_files.max(1)
    }

    async fn parse_all(&self, files: Vec<YearlyFile>) -> Result<Vec<FileOutcome>, ImportError> {
        let outcomes: Vec<Option<FileOutcome>> = stream::iter(files)
            .map(|file| {
                let parser = self.parser.clone();
                let cancel = self.cancel.clone();

                async move {
                    if is_cancelled(cancel.as_ref()) {
                        return None;
                    }

                    let path = file.path;
                    let task_path = path.clone();
                    let result = tokio::task::spawn_blocking(move || parser.parse_file(&task_path))
                        .await
                        .unwrap_or_else(|e| {
                            Err(ImportError::Io {
                                message: format!("Parser task failed: {}", e),
                            })
                        });

                    Some(FileOutcome { path, result })
                }
            })
            .buffered(self.concurrency())
            .collect()
            .await;

        outcomes
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(ImportError::Cancelled)
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Validate names, parse all files concurrently, then merge
    fn process(&self, inputs: &[PathBuf]) -> Result<ProcessingResult, ImportError> {
        let files = validate_yearly_structure(inputs)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.concurrency())
            .build()
            .map_err(|e| ImportError::Io {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let outcomes = runtime.block_on(self.parse_all(files))?;

        Ok(merge_outcomes(outcomes))
    }
}
