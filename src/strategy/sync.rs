//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. It coordinates:
//! - CSV parsing through `SyncReader` (iterator interface)
//! - Wallet operations through `WalletProcessor`
//! - CSV output through `csv_format::write_transactions_csv`

use crate::core::{RunSummary, WalletProcessor, WalletSetup};
use crate::io::csv_format::write_transactions_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use multisig_wallet::core::WalletSetup;
/// use multisig_wallet::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use multisig_wallet::types::Address;
/// use std::path::Path;
/// use std::io;
///
/// let setup = WalletSetup::new(vec![Address::from_low_u64(1), Address::from_low_u64(2)]);
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy.process(&setup, Path::new("script.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        setup: &WalletSetup,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunSummary, String> {
        let mut processor = WalletProcessor::new(setup)
            .map_err(|e| format!("Failed to create wallet: {}", e))?;

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(record) => {
                    if let Err(e) = processor.process(record) {
                        warn!(
                            op = %record.operation.op_type(),
                            caller = %record.caller,
                            error = %e,
                            "Operation rejected"
                        );
                    }
                }
                Err(e) => warn!(error = %e, "Skipping invalid record"),
            }
        }

        write_transactions_csv(processor.transactions(), output)?;

        Ok(processor.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;
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

    #[test]
    fn test_sync_strategy_runs_send() {
        let content = format!(
            "op,caller,tx,amount,address\n\
             deposit,{D1},,10,\n\
             send,{A1},,4,{D1}\n\
             execute,{A2},0,,\n"
        );
        let file = create_temp_csv(&content);

        let mut output = Vec::new();
        let summary = SyncProcessingStrategy
            .process(&setup(), file.path(), &mut output)
            .unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            format!("id,kind,amount,recipient,approvals,executed\n0,send,4,{D1},1,true\n")
        );
        assert_eq!(summary.balance, 6);
        assert_eq!(summary.payouts.get(&Address::from_low_u64(0xd1)), Some(&4));
    }

    #[test]
    fn test_sync_strategy_continues_past_rejections() {
        let content = format!(
            "op,caller,tx,amount,address\n\
             withdraw,{D1},,,\n\
             bogus,{A1},,,\n\
             withdraw,{A1},,,\n\
             approve,{A1},0,,\n\
             approve,{A2},0,,\n"
        );
        let file = create_temp_csv(&content);

        let mut output = Vec::new();
        let summary = SyncProcessingStrategy
            .process(&setup(), file.path(), &mut output)
            .unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.ends_with("0,withdraw,,,2,false\n"));
        assert_eq!(summary.transactions, 1);
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let mut output = Vec::new();

        let result = SyncProcessingStrategy.process(&setup(), Path::new("nonexistent.csv"), &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_strategy_rejects_invalid_owner_set() {
        let file = create_temp_csv("op,caller,tx,amount,address\n");
        let setup = WalletSetup::new(vec![Address::from_low_u64(0xa1), Address::from_low_u64(0xa1)]);
        let mut output = Vec::new();

        let result = SyncProcessingStrategy.process(&setup, file.path(), &mut output);
        assert!(result.unwrap_err().contains("Duplicate owner"));
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
