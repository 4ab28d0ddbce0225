//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `address`: Owner and recipient identities
//! - `transaction`: Proposals, amounts and script operations
//! - `event`: Notifications emitted on state changes
//! - `error`: Error types for the wallet

pub mod address;
pub mod error;
pub mod event;
pub mod transaction;

pub use address::Address;
pub use error::{TransferError, WalletError};
pub use event::WalletEvent;
pub use transaction::{
    Amount, Operation, OperationRecord, OperationType, Transaction, TransactionId,
    TransactionKind,
};
