use crate::core::{QuorumPolicy, WalletConfig, WalletSetup, WithdrawPolicy};
use crate::strategy::BatchConfig;
use crate::types::Address;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run an operation script against a multi-owner wallet
#[derive(Parser, Debug)]
#[command(name = "multisig-wallet")]
#[command(about = "Run an operation script against a multi-owner wallet", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the operation script")]
    pub input_file: PathBuf,

    /// Initial owner identities
    #[arg(
        long = "owners",
        value_name = "ADDRESSES",
        value_delimiter = ',',
        required = true,
        help = "Comma-separated owner identities (0x-prefixed hex)"
    )]
    pub owners: Vec<Address>,

    /// Recipients the host refuses to pay
    #[arg(
        long = "reject",
        value_name = "ADDRESSES",
        value_delimiter = ',',
        help = "Comma-separated recipients whose transfers fail"
    )]
    pub reject: Vec<Address>,

    /// Parsing strategy to use for processing the script
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Parsing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    #[arg(long = "quorum", value_name = "POLICY", default_value = "all-approvals")]
    pub quorum: QuorumPolicy,

    #[arg(long = "withdraw", value_name = "POLICY", default_value = "repeatable")]
    pub withdraw: WithdrawPolicy,

    /// Allow operations to be re-entered from inside a transfer
    #[arg(long = "no-reentrancy-guard")]
    pub no_reentrancy_guard: bool,

    /// Number of records per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of records per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Log at debug level
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Available parsing strategies for CSV processing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    pub fn to_wallet_config(&self) -> WalletConfig {
        WalletConfig::default()
            .with_quorum(self.quorum)
            .with_withdraw(self.withdraw)
            .with_reentrancy_guard(!self.no_reentrancy_guard)
    }

    /// Owners, configuration and rejecting recipients for the new wallet
    pub fn to_wallet_setup(&self) -> WalletSetup {
        WalletSetup::new(self.owners.clone())
            .with_config(self.to_wallet_config())
            .with_rejecting(self.reject.clone())
    }

    /// Create a BatchConfig from CLI arguments
    ///
    /// Zero falls back to the default batch size with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        match self.batch_size {
            Some(batch_size) => BatchConfig::new(batch_size),
            None => BatchConfig::default(),
        }
    }
}
