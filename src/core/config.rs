//! Wallet behaviour configuration
//!
//! The default policies are the permissive ones (stale approvals count,
//! Withdraw repeats) with the reentrancy guard on. Each knob can be tightened
//! or, for the guard, relaxed independently.

use clap::ValueEnum;

/// Which approvals count toward quorum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum QuorumPolicy {
    /// Every set approval counts, including approvals left behind by
    /// identities that have since replaced themselves
    #[default]
    AllApprovals,

    /// Only approvals from identities that are owners at execution time count
    CurrentOwners,
}

/// Terminal-state behaviour of Withdraw transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WithdrawPolicy {
    /// A Withdraw with standing quorum may be executed again while funds remain
    #[default]
    Repeatable,

    /// A Withdraw is marked executed like a Send and runs at most once
    OneShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletConfig {
    pub quorum: QuorumPolicy,
    pub withdraw: WithdrawPolicy,

    /// Reject guarded operations re-entered from inside a transfer
    pub reentrancy_guard: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            quorum: QuorumPolicy::default(),
            withdraw: WithdrawPolicy::default(),
            reentrancy_guard: true,
        }
    }
}

impl WalletConfig {
    /// Default policies with the reentrancy guard off
    pub fn unguarded() -> Self {
        Self {
            reentrancy_guard: false,
            ..Self::default()
        }
    }

    pub fn with_quorum(mut self, quorum: QuorumPolicy) -> Self {
        self.quorum = quorum;
        self
    }

    pub fn with_withdraw(mut self, withdraw: WithdrawPolicy) -> Self {
        self.withdraw = withdraw;
        self
    }

    pub fn with_reentrancy_guard(mut self, enabled: bool) -> Self {
        self.reentrancy_guard = enabled;
        self
    }
}
