//! Processing strategy module for operation scripts
//!
//! This module defines the Strategy pattern for complete script processing
//! pipelines, covering both CSV parsing and wallet processing. Different
//! reader implementations (synchronous, asynchronous batch) can be selected
//! at runtime while the wallet semantics stay identical.

use crate::cli::StrategyType;
use crate::core::{RunSummary, WalletSetup};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete script pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Run the script at `input_path` against a fresh wallet and write the
    /// transaction table to `output`
    ///
    /// # Arguments
    ///
    /// * `setup` - Owners, configuration and host behaviour for the new wallet
    /// * `input_path` - Path to the operation script
    /// * `output` - Writer receiving the transaction table as CSV
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` once every record has been applied or skipped
    /// * `Err(String)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner set in `setup` is invalid
    /// - The input file cannot be opened
    /// - Output cannot be written
    ///
    /// Malformed rows and operations the wallet rejects are logged and
    /// skipped. They never abort the run.
    fn process(
        &self,
        setup: &WalletSetup,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunSummary, String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch reading (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
