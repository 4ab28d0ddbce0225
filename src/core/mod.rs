//! Core wallet logic module
//!
//! This module contains the wallet components:
//! - `owner_registry` - The ordered set of owner identities
//! - `transaction_store` - Append-only list of proposals
//! - `approval_ledger` - Per-transaction approval flags
//! - `wallet` - The wallet surface composing the above
//! - `engine` - Quorum evaluation and execution
//! - `traits` - The host's value-transfer capability
//! - `host` - In-memory host used by the script pipeline and tests
//! - `processor` - Applies script operations to a wallet
//! - `config` - Behaviour policies

pub mod approval_ledger;
pub mod config;
pub mod engine;
pub mod host;
pub mod owner_registry;
pub mod processor;
pub mod traits;
pub mod transaction_store;
pub mod wallet;

pub use approval_ledger::ApprovalLedger;
pub use config::{QuorumPolicy, WalletConfig, WithdrawPolicy};
pub use engine::quorum_reached;
pub use host::InMemoryHost;
pub use owner_registry::OwnerRegistry;
pub use processor::{RunSummary, WalletProcessor, WalletSetup};
pub use traits::ValueTransfer;
pub use transaction_store::TransactionStore;
pub use wallet::MultiSigWallet;
