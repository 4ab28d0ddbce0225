//! Wallet notifications
//!
//! Every successful state change appends one or more events to the wallet's
//! event log. Events emitted during an invocation that later fails are
//! discarded together with the rest of that invocation's state.

use super::address::Address;
use super::transaction::{Amount, TransactionId, TransactionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// Value was attached to the wallet
    Deposited {
        sender: Address,
        amount: Amount,
        balance: Amount,
    },

    /// A proposal was stored; carries its kind, amount and recipient
    TransactionCreated {
        creator: Address,
        id: TransactionId,
        kind: TransactionKind,
    },

    Approved {
        owner: Address,
        id: TransactionId,
    },

    ApprovalRemoved {
        owner: Address,
        id: TransactionId,
    },

    Executed {
        executor: Address,
        id: TransactionId,
    },

    /// A Withdraw distributed `amount`, the balance before splitting
    Withdrawn {
        amount: Amount,
    },

    OwnerChanged {
        previous: Address,
        replacement: Address,
    },
}
