//! Multi-owner custodial wallet
//!
//! # Overview
//!
//! A wallet that holds a native balance on behalf of a fixed-size set of
//! owners. Any owner may propose a transaction; owners approve it; once at
//! least half of the current owners approve (`2·A ≥ N`), any owner may
//! execute it. Value only leaves through the host's transfer primitive.
//!
//! # Architecture
//!
//! - [`types`] - Identities, transactions, events and errors
//! - [`core`] - Wallet components:
//!   - [`core::owner_registry`] - Ordered owner set with self-replacement
//!   - [`core::transaction_store`] - Append-only proposals
//!   - [`core::approval_ledger`] - Per-transaction approval flags
//!   - [`core::wallet`] - The wallet surface
//!   - [`core::engine`] - Quorum and execution
//!   - [`core::host`] - In-memory host implementing [`core::ValueTransfer`]
//! - [`io`] - Operation script parsing and transaction table output
//! - [`strategy`] - Sync and async script pipelines
//! - [`cli`] - CLI arguments parsing
//!
//! # Transaction Kinds
//!
//! - **Send**: move a fixed amount to a recipient, at most once
//! - **Withdraw**: split the whole balance equally among the current owners;
//!   the remainder stays and the transaction may be executed again
//!
//! # Atomicity
//!
//! Every operation either succeeds completely or leaves no trace. Execution
//! snapshots the wallet and checkpoints the host on entry and restores both
//! if any step fails, including a transfer to the last recipient.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    InMemoryHost, MultiSigWallet, QuorumPolicy, ValueTransfer, WalletConfig, WalletProcessor,
    WalletSetup, WithdrawPolicy,
};
pub use io::write_transactions_csv;
pub use types::{
    Address, Amount, Operation, OperationRecord, Transaction, TransactionId, TransactionKind,
    TransferError, WalletError, WalletEvent,
};
