//! Error types for the multi-owner wallet
//!
//! Every wallet operation either succeeds completely or fails with one of the
//! variants below, in which case no state change from that invocation is
//! observable afterwards.
//!
//! # Error Categories
//!
//! - **Authorization**: caller is not an owner, reentrant call
//! - **Registry**: null identity, duplicate owner, empty owner set
//! - **Approval**: approval toggled against its current state
//! - **Execution**: quorum, funds, terminal state, transfer failure

use super::address::Address;
use super::transaction::{Amount, TransactionId};
use thiserror::Error;

/// Failure reported by the host's value-transfer primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The recipient refused the value
    #[error("recipient {recipient} rejected the transfer")]
    Rejected { recipient: Address },

    /// Crediting the recipient would overflow its balance
    #[error("balance of {recipient} would overflow")]
    Overflow { recipient: Address },
}

/// Main error type for the wallet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// A mutating operation was invoked by an identity outside the registry
    #[error("Caller {caller} is not an owner")]
    CallerNotOwner { caller: Address },

    /// A supplied owner or recipient identity is null
    #[error("Zero address is not allowed")]
    ZeroAddress,

    /// Construction or replacement would repeat a registry entry
    #[error("Duplicate owner {owner}")]
    DuplicateOwner { owner: Address },

    /// Construction was attempted with no owners at all
    #[error("Owner set must not be empty")]
    EmptyOwnerSet,

    #[error("Transaction {id} not found")]
    TransactionNotFound { id: TransactionId },

    #[error("Owner {owner} already approved transaction {id}")]
    AlreadyApproved { owner: Address, id: TransactionId },

    #[error("Owner {owner} has not approved transaction {id}")]
    NotApproved { owner: Address, id: TransactionId },

    /// Execution attempted below quorum
    #[error("Not enough approvals: {current} of {owners} owners")]
    NotEnoughApprovals { current: usize, owners: usize },

    /// A Send requested more than the wallet holds
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Amount, requested: Amount },

    #[error("Transaction {id} already executed")]
    AlreadyExecuted { id: TransactionId },

    /// The host's transfer primitive reported failure
    #[error("Transfer of {amount} to {recipient} failed: {source}")]
    TransferFailed {
        recipient: Address,
        amount: Amount,
        #[source]
        source: TransferError,
    },

    /// A guarded operation was entered while an execution was in progress
    #[error("Reentrant call rejected")]
    ReentrantCall,

    /// A deposit would overflow the wallet balance
    #[error("Deposit of {amount} would overflow balance {balance}")]
    BalanceOverflow { balance: Amount, amount: Amount },

    /// An identity string could not be parsed
    #[error("Invalid address '{value}'")]
    InvalidAddress { value: String },
}

// Helper functions for creating common errors

impl WalletError {
    pub fn caller_not_owner(caller: Address) -> Self {
        WalletError::CallerNotOwner { caller }
    }

    pub fn duplicate_owner(owner: Address) -> Self {
        WalletError::DuplicateOwner { owner }
    }

    pub fn transaction_not_found(id: TransactionId) -> Self {
        WalletError::TransactionNotFound { id }
    }

    pub fn already_approved(owner: Address, id: TransactionId) -> Self {
        WalletError::AlreadyApproved { owner, id }
    }

    pub fn not_approved(owner: Address, id: TransactionId) -> Self {
        WalletError::NotApproved { owner, id }
    }

    pub fn not_enough_approvals(current: usize, owners: usize) -> Self {
        WalletError::NotEnoughApprovals { current, owners }
    }

    pub fn insufficient_funds(balance: Amount, requested: Amount) -> Self {
        WalletError::InsufficientFunds { balance, requested }
    }

    pub fn already_executed(id: TransactionId) -> Self {
        WalletError::AlreadyExecuted { id }
    }

    pub fn transfer_failed(recipient: Address, amount: Amount, source: TransferError) -> Self {
        WalletError::TransferFailed {
            recipient,
            amount,
            source,
        }
    }

    pub fn invalid_address(value: &str) -> Self {
        WalletError::InvalidAddress {
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn a1() -> Address {
        Address::from_low_u64(0xa1)
    }

    #[rstest]
    #[case::caller_not_owner(
        WalletError::CallerNotOwner { caller: a1() },
        "Caller 0x00000000000000000000000000000000000000a1 is not an owner"
    )]
    #[case::zero_address(WalletError::ZeroAddress, "Zero address is not allowed")]
    #[case::duplicate_owner(
        WalletError::DuplicateOwner { owner: a1() },
        "Duplicate owner 0x00000000000000000000000000000000000000a1"
    )]
    #[case::transaction_not_found(
        WalletError::TransactionNotFound { id: 7 },
        "Transaction 7 not found"
    )]
    #[case::not_enough_approvals(
        WalletError::NotEnoughApprovals { current: 1, owners: 3 },
        "Not enough approvals: 1 of 3 owners"
    )]
    #[case::insufficient_funds(
        WalletError::InsufficientFunds { balance: 5, requested: 10 },
        "Insufficient funds: balance 5, requested 10"
    )]
    #[case::already_executed(WalletError::AlreadyExecuted { id: 0 }, "Transaction 0 already executed")]
    #[case::transfer_failed(
        WalletError::TransferFailed {
            recipient: a1(),
            amount: 3,
            source: TransferError::Rejected { recipient: a1() },
        },
        "Transfer of 3 to 0x00000000000000000000000000000000000000a1 failed: recipient 0x00000000000000000000000000000000000000a1 rejected the transfer"
    )]
    #[case::reentrant(WalletError::ReentrantCall, "Reentrant call rejected")]
    #[case::invalid_address(
        WalletError::InvalidAddress { value: "0x12".to_string() },
        "Invalid address '0x12'"
    )]
    fn test_error_display(#[case] error: WalletError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::caller_not_owner(
        WalletError::caller_not_owner(a1()),
        WalletError::CallerNotOwner { caller: a1() }
    )]
    #[case::already_approved(
        WalletError::already_approved(a1(), 2),
        WalletError::AlreadyApproved { owner: a1(), id: 2 }
    )]
    #[case::not_approved(
        WalletError::not_approved(a1(), 2),
        WalletError::NotApproved { owner: a1(), id: 2 }
    )]
    #[case::insufficient_funds(
        WalletError::insufficient_funds(1, 2),
        WalletError::InsufficientFunds { balance: 1, requested: 2 }
    )]
    fn test_helper_functions(#[case] result: WalletError, #[case] expected: WalletError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_transfer_failed_exposes_source() {
        use std::error::Error;

        let error =
            WalletError::transfer_failed(a1(), 1, TransferError::Overflow { recipient: a1() });
        let source = error.source().expect("source should be set");
        assert!(source.to_string().contains("would overflow"));
    }
}
