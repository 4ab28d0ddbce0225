//! Transaction-related types for the multi-owner wallet
//!
//! This module defines the proposals tracked by the wallet and the script
//! operations that drive it from the command line.

use super::address::Address;
use std::fmt;

/// Native value, in the host's smallest unit
pub type Amount = u128;

/// Transaction identifier
///
/// Assigned sequentially from zero at creation and never reused.
pub type TransactionId = usize;

/// The action a transaction performs once it reaches quorum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Move `amount` to `recipient`
    ///
    /// The recipient need not be an owner but must not be the null identity.
    Send { amount: Amount, recipient: Address },

    /// Split the entire balance equally among the owners at execution time
    ///
    /// The division remainder stays in the wallet.
    Withdraw,
}

impl TransactionKind {
    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::Send { .. } => "send",
            TransactionKind::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Send { amount, recipient } => {
                write!(f, "send {} to {}", amount, recipient)
            }
            TransactionKind::Withdraw => f.write_str("withdraw"),
        }
    }
}

/// A stored proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Position in the transaction store
    pub id: TransactionId,

    pub kind: TransactionKind,

    /// Number of true approval entries for this id
    ///
    /// Counts every identity that approved and has not removed its approval,
    /// including identities that have since been replaced as owners.
    pub approval_count: usize,

    /// Terminal flag
    ///
    /// Always set by a successful Send. Withdraw only sets it under
    /// [`WithdrawPolicy::OneShot`](crate::core::WithdrawPolicy::OneShot).
    pub executed: bool,
}

/// Operation types accepted in an operation script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Attach value to the wallet (any caller)
    Deposit,
    /// Propose a Send (owner)
    Send,
    /// Propose a Withdraw (owner)
    Withdraw,
    /// Approve a transaction (owner)
    Approve,
    /// Remove a previous approval (owner)
    Revoke,
    /// Execute a transaction that reached quorum (owner)
    Execute,
    /// Replace the caller's own registry slot (owner)
    Replace,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationType::Deposit => "deposit",
            OperationType::Send => "send",
            OperationType::Withdraw => "withdraw",
            OperationType::Approve => "approve",
            OperationType::Revoke => "revoke",
            OperationType::Execute => "execute",
            OperationType::Replace => "replace",
        };
        f.write_str(name)
    }
}

/// A fully validated script operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit { amount: Amount },
    Send { amount: Amount, recipient: Address },
    Withdraw,
    Approve { tx: TransactionId },
    Revoke { tx: TransactionId },
    Execute { tx: TransactionId },
    Replace { new_owner: Address },
}

impl Operation {
    pub fn op_type(&self) -> OperationType {
        match self {
            Operation::Deposit { .. } => OperationType::Deposit,
            Operation::Send { .. } => OperationType::Send,
            Operation::Withdraw => OperationType::Withdraw,
            Operation::Approve { .. } => OperationType::Approve,
            Operation::Revoke { .. } => OperationType::Revoke,
            Operation::Execute { .. } => OperationType::Execute,
            Operation::Replace { .. } => OperationType::Replace,
        }
    }
}

/// One row of an operation script
///
/// The caller identity is taken as authenticated, the way the host would
/// supply it on a real invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationRecord {
    pub caller: Address,
    pub operation: Operation,
}
