//! Multi-owner wallet CLI
//!
//! Runs an operation script against a fresh wallet and prints the resulting
//! transaction table.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --owners 0xA..,0xB..,0xC.. script.csv > transactions.csv
//! cargo run -- --owners 0xA..,0xB.. --strategy async --batch-size 500 script.csv
//! cargo run -- --owners 0xA..,0xB.. --quorum current-owners --withdraw one-shot script.csv
//! ```
//!
//! The transaction table goes to stdout. Logs go to stderr; set `RUST_LOG` or
//! pass `--verbose` for more detail.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid owner set, file not found, output failure)

use multisig_wallet::cli;
use multisig_wallet::strategy;
use std::process;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn main() {
    let args = cli::parse_args();
    init_tracing(args.verbose);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let setup = args.to_wallet_setup();
    let mut output = std::io::stdout();
    match strategy.process(&setup, &args.input_file, &mut output) {
        Ok(summary) => info!(
            balance = summary.balance,
            owners = summary.owners.len(),
            transactions = summary.transactions,
            events = summary.events,
            recipients = summary.payouts.len(),
            "Script processed"
        ),
        Err(e) => {
            error!(error = %e, "Processing failed");
            process::exit(1);
        }
    }
}
