//! Benchmark suite for comparing processing strategies
//!
//! Compares the sync and async script pipelines using the divan
//! benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! # Generated Scripts
//!
//! Each benchmark writes a script to a temporary file before timing starts.
//! A script repeats one round of operations against a three-owner wallet:
//! - a deposit
//! - a Send proposal, an approval and its execution
//! - a Withdraw proposal, an approval and its execution
//!
//! so every round exercises quorum checks, transfers and event emission.

use multisig_wallet::cli::StrategyType;
use multisig_wallet::core::WalletSetup;
use multisig_wallet::strategy::{create_strategy, BatchConfig};
use multisig_wallet::types::Address;
use std::io::Write;
use tempfile::NamedTempFile;

fn main() {
    divan::main();
}

const ROUNDS: &[usize] = &[10, 100, 1_000];

fn setup() -> WalletSetup {
    WalletSetup::new((1..=3).map(Address::from_low_u64).collect())
}

fn generate_script(rounds: usize) -> NamedTempFile {
    let owners: Vec<Address> = (1..=3).map(Address::from_low_u64).collect();
    let funder = Address::from_low_u64(0xf1);
    let recipient = Address::from_low_u64(0xd1);

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "op,caller,tx,amount,address").expect("Failed to write header");

    for round in 0..rounds {
        let send = round * 2;
        let withdraw = send + 1;
        let (a, b, c) = (owners[round % 3], owners[(round + 1) % 3], owners[(round + 2) % 3]);

        writeln!(file, "deposit,{funder},,1000,").expect("Failed to write row");
        writeln!(file, "send,{a},,10,{recipient}").expect("Failed to write row");
        writeln!(file, "approve,{b},{send},,").expect("Failed to write row");
        writeln!(file, "execute,{c},{send},,").expect("Failed to write row");
        writeln!(file, "withdraw,{b},,,").expect("Failed to write row");
        writeln!(file, "approve,{c},{withdraw},,").expect("Failed to write row");
        writeln!(file, "execute,{a},{withdraw},,").expect("Failed to write row");
    }

    file.flush().expect("Failed to flush temp file");
    file
}

fn run(bencher: divan::Bencher, strategy_type: StrategyType, rounds: usize) {
    let script = generate_script(rounds);
    let setup = setup();
    let strategy = create_strategy(strategy_type, Some(BatchConfig::default()));

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(&setup, script.path(), &mut output)
            .expect("Processing failed");
        output
    });
}

#[divan::bench(args = ROUNDS)]
fn sync_strategy(bencher: divan::Bencher, rounds: usize) {
    run(bencher, StrategyType::Sync, rounds);
}

#[divan::bench(args = ROUNDS)]
fn async_strategy(bencher: divan::Bencher, rounds: usize) {
    run(bencher, StrategyType::Async, rounds);
}
