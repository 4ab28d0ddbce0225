//! Execution engine
//!
//! This module implements [`MultiSigWallet::execute`], the only operation
//! that moves value out of the wallet.
//!
//! The engine enforces:
//! - owner-only execution
//! - quorum against the registry size at execution time (`2·A ≥ N`)
//! - one-shot Sends, marked executed before any value leaves
//! - all-or-nothing invocations: on any failure the wallet state is restored
//!   from the snapshot taken on entry and the host is rolled back to its
//!   checkpoint, undoing transfers already issued by this invocation

use crate::core::config::{QuorumPolicy, WithdrawPolicy};
use crate::core::traits::ValueTransfer;
use crate::core::wallet::MultiSigWallet;
use crate::types::{Address, Amount, TransactionId, TransactionKind, WalletError, WalletEvent};
use tracing::{debug, info, warn};

/// Whether `approvals` out of `owners` is at least half
pub fn quorum_reached(approvals: usize, owners: usize) -> bool {
    approvals.saturating_mul(2) >= owners
}

impl MultiSigWallet {
    /// Execute transaction `id` on behalf of `caller`
    ///
    /// # Errors
    ///
    /// - `ReentrantCall` if the guard is on and another execution is in progress
    /// - `CallerNotOwner` if `caller` is not an owner
    /// - `TransactionNotFound` if `id` was never created
    /// - `NotEnoughApprovals` if quorum is not reached
    /// - `AlreadyExecuted` for a completed Send (or one-shot Withdraw)
    /// - `InsufficientFunds` if a Send asks for more than the balance
    /// - `TransferFailed` if the host rejects any transfer
    pub fn execute(
        &mut self,
        caller: Address,
        id: TransactionId,
        host: &mut dyn ValueTransfer,
    ) -> Result<(), WalletError> {
        self.ensure_not_executing()?;

        let snapshot = self.state.clone();
        let checkpoint = host.checkpoint();
        let was_executing = self.executing;
        self.executing = true;

        let result = self.execute_unchecked(caller, id, host);

        self.executing = was_executing;
        if let Err(e) = &result {
            warn!(id, executor = %caller, error = %e, "Execution failed, rolling back");
            self.state = snapshot;
            host.rollback(checkpoint);
        }

        result
    }

    /// Approvals that count toward quorum for `id` under the configured policy
    pub fn effective_approvals(&self, id: TransactionId) -> Result<usize, WalletError> {
        let tx = self.state.transactions.get(id)?;

        Ok(match self.config.quorum {
            QuorumPolicy::AllApprovals => tx.approval_count,
            QuorumPolicy::CurrentOwners => self
                .state
                .approvals
                .current_owner_approvals(id, &self.state.registry),
        })
    }

    fn execute_unchecked(
        &mut self,
        caller: Address,
        id: TransactionId,
        host: &mut dyn ValueTransfer,
    ) -> Result<(), WalletError> {
        self.state.registry.ensure_owner(&caller)?;

        let tx = self.state.transactions.get(id)?;
        let (kind, executed) = (tx.kind, tx.executed);

        let approvals = self.effective_approvals(id)?;
        let owners = self.state.registry.len();
        debug!(id, approvals, owners, "Checking quorum");
        if !quorum_reached(approvals, owners) {
            return Err(WalletError::not_enough_approvals(approvals, owners));
        }

        match kind {
            TransactionKind::Send { amount, recipient } => {
                self.execute_send(caller, id, executed, amount, recipient, host)
            }
            TransactionKind::Withdraw => self.execute_withdraw(caller, id, executed, host),
        }
    }

    fn execute_send(
        &mut self,
        caller: Address,
        id: TransactionId,
        executed: bool,
        amount: Amount,
        recipient: Address,
        host: &mut dyn ValueTransfer,
    ) -> Result<(), WalletError> {
        if executed {
            return Err(WalletError::already_executed(id));
        }

        let balance = self.state.balance;
        if amount > balance {
            return Err(WalletError::insufficient_funds(balance, amount));
        }

        // State first: a reentrant execute of this id must see it as done
        self.state.transactions.get_mut(id)?.executed = true;
        self.state.balance = balance - amount;

        host.transfer(self, recipient, amount)
            .map_err(|source| WalletError::transfer_failed(recipient, amount, source))?;

        info!(id, executor = %caller, amount, recipient = %recipient, "Send executed");
        self.emit(WalletEvent::Executed {
            executor: caller,
            id,
        });

        Ok(())
    }

    fn execute_withdraw(
        &mut self,
        caller: Address,
        id: TransactionId,
        executed: bool,
        host: &mut dyn ValueTransfer,
    ) -> Result<(), WalletError> {
        if self.config.withdraw == WithdrawPolicy::OneShot {
            if executed {
                return Err(WalletError::already_executed(id));
            }
            self.state.transactions.get_mut(id)?.executed = true;
        }

        let total = self.state.balance;
        let owners = self.state.registry.owners().to_vec();
        // The registry is never empty
        let share = total / owners.len() as Amount;

        for owner in owners {
            let balance = self.state.balance;
            self.state.balance = balance
                .checked_sub(share)
                .ok_or_else(|| WalletError::insufficient_funds(balance, share))?;

            host.transfer(self, owner, share)
                .map_err(|source| WalletError::transfer_failed(owner, share, source))?;
        }

        info!(
            id,
            executor = %caller,
            total,
            share,
            remainder = self.state.balance,
            "Withdraw executed"
        );
        self.emit(WalletEvent::Withdrawn { amount: total });
        self.emit(WalletEvent::Executed {
            executor: caller,
            id,
        });

        Ok(())
    }
}
