//! Asynchronous batch processing strategy
//!
//! This module provides an implementation of the ProcessingStrategy trait
//! that reads the script in batches through `csv-async` over a tokio file.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size)
//!     ├── AsyncReader (batch CSV reading)
//!     └── WalletProcessor (wallet + in-memory host)
//! ```
//!
//! The host delivers invocations one at a time, so every batch is applied to
//! the wallet in file order on a current-thread runtime. Batching only
//! affects how much of the script is buffered.

use crate::core::{RunSummary, WalletProcessor, WalletSetup};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_transactions_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for batch reading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of records read per batch
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { batch_size: 1000 }
    }
}

impl BatchConfig {
    /// Create a BatchConfig, falling back to the default batch size for zero
    pub fn new(batch_size: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        Self { batch_size }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        setup: &WalletSetup,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunSummary, String> {
        let mut processor = WalletProcessor::new(setup)
            .map_err(|e| format!("Failed to create wallet: {}", e))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io::AsyncRead
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                debug!(records = batch.len(), "Applying batch");

                for record in batch {
                    if let Err(e) = processor.process(record) {
                        warn!(
                            op = %record.operation.op_type(),
                            caller = %record.caller,
                            error = %e,
                            "Operation rejected"
                        );
                    }
                }
            }

            Ok::<(), String>(())
        })?;

        write_transactions_csv(processor.transactions(), output)?;

        Ok(processor.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SyncProcessingStrategy;
    use crate::types::Address;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const A1: &str = "0x00000000000000000000000000000000000000a1";
    const A2: &str = "0x00000000000000000000000000000000000000a2";
    const D1: &str = "0x00000000000000000000000000000000000000d1";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn setup() -> WalletSetup {
        WalletSetup::new(vec![Address::from_low_u64(0xa1), Address::from_low_u64(0xa2)])
    }

    #[rstest]
    #[case::valid(250, 250)]
    #[case::zero_falls_back(0, 1000)]
    fn test_batch_config_new(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(BatchConfig::new(requested).batch_size, expected);
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(&setup(), Path::new("nonexistent.csv"), &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[rstest]
    #[case::single_record_batches(1)]
    #[case::small_batches(2)]
    #[case::one_batch(1000)]
    fn test_async_strategy_matches_sync_across_batches(#[case] batch_size: usize) {
        // Later operations depend on earlier ones across batch boundaries
        let content = format!(
            "op,caller,tx,amount,address\n\
             deposit,{D1},,101,\n\
             withdraw,{A1},,,\n\
             send,{A2},,1,{D1}\n\
             execute,{A2},1,,\n\
             approve,{A2},0,,\n\
             execute,{A1},0,,\n\
             revoke,{A2},0,,\n"
        );
        let file = create_temp_csv(&content);

        let mut sync_output = Vec::new();
        let sync_summary = SyncProcessingStrategy
            .process(&setup(), file.path(), &mut sync_output)
            .unwrap();

        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(batch_size));
        let mut async_output = Vec::new();
        let async_summary = strategy
            .process(&setup(), file.path(), &mut async_output)
            .unwrap();

        assert_eq!(async_output, sync_output);
        assert_eq!(async_summary, sync_summary);
        assert_eq!(async_summary.balance, 0);
        assert_eq!(async_summary.payouts.get(&Address::from_low_u64(0xa1)), Some(&50));
    }
}
