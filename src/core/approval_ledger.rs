//! Approval bookkeeping
//!
//! The ApprovalLedger records which identities currently approve which
//! transaction. Each approve/remove also adjusts the cached
//! `approval_count` on the stored transaction, keeping the two in step.
//!
//! Entries are keyed by identity, not by registry slot: replacing an owner
//! leaves its approvals in place and they keep counting toward
//! `approval_count`. [`ApprovalLedger::current_owner_approvals`] gives the
//! count restricted to identities that are owners right now.

use crate::core::owner_registry::OwnerRegistry;
use crate::core::transaction_store::TransactionStore;
use crate::types::{Address, TransactionId, WalletError};
use std::collections::{BTreeSet, HashMap};

/// Per-transaction, per-identity approval flags
#[derive(Debug, Clone, Default)]
pub struct ApprovalLedger {
    approvals: HashMap<TransactionId, BTreeSet<Address>>,
}

impl ApprovalLedger {
    pub fn new() -> Self {
        ApprovalLedger {
            approvals: HashMap::new(),
        }
    }

    /// Whether `owner` currently approves transaction `id`
    pub fn is_approved(&self, owner: &Address, id: TransactionId) -> bool {
        self.approvals
            .get(&id)
            .is_some_and(|approvers| approvers.contains(owner))
    }

    /// Set the flag without touching any transaction
    ///
    /// Returns false if it was already set. Used for the creator's implicit
    /// approval, whose count is initialised by the store.
    pub(crate) fn record(&mut self, owner: Address, id: TransactionId) -> bool {
        self.approvals.entry(id).or_default().insert(owner)
    }

    /// Approve a transaction on behalf of `caller`
    ///
    /// # Errors
    ///
    /// - `CallerNotOwner` if `caller` is not an owner
    /// - `TransactionNotFound` if `id` was never created
    /// - `AlreadyApproved` if `caller` already approves `id`
    pub fn approve(
        &mut self,
        registry: &OwnerRegistry,
        store: &mut TransactionStore,
        caller: Address,
        id: TransactionId,
    ) -> Result<(), WalletError> {
        registry.ensure_owner(&caller)?;
        let tx = store.get_mut(id)?;

        if self.is_approved(&caller, id) {
            return Err(WalletError::already_approved(caller, id));
        }

        self.record(caller, id);
        tx.approval_count += 1;

        Ok(())
    }

    /// Withdraw `caller`'s approval of a transaction
    ///
    /// # Errors
    ///
    /// - `CallerNotOwner` if `caller` is not an owner
    /// - `TransactionNotFound` if `id` was never created
    /// - `NotApproved` if `caller` does not currently approve `id`
    pub fn remove_approval(
        &mut self,
        registry: &OwnerRegistry,
        store: &mut TransactionStore,
        caller: Address,
        id: TransactionId,
    ) -> Result<(), WalletError> {
        registry.ensure_owner(&caller)?;
        let tx = store.get_mut(id)?;

        let removed = self
            .approvals
            .get_mut(&id)
            .is_some_and(|approvers| approvers.remove(&caller));
        if !removed {
            return Err(WalletError::not_approved(caller, id));
        }

        // The count always equals the number of set flags, so it is at least one here
        tx.approval_count -= 1;

        Ok(())
    }

    /// Identities approving `id`, including replaced owners
    pub fn approvers(&self, id: TransactionId) -> impl Iterator<Item = &Address> {
        self.approvals.get(&id).into_iter().flatten()
    }

    /// Approvals of `id` from identities that are owners right now
    pub fn current_owner_approvals(&self, id: TransactionId, registry: &OwnerRegistry) -> usize {
        self.approvers(id)
            .filter(|approver| registry.is_owner(approver))
            .count()
    }
}
