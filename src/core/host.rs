//! In-memory host environment
//!
//! `InMemoryHost` stands in for the environment that would normally carry
//! value out of the wallet. Recipients are credited in a balance map, every
//! transfer is journaled so a failed invocation can be rolled back, and
//! specific recipients can be configured to refuse value.

use crate::core::traits::ValueTransfer;
use crate::core::wallet::MultiSigWallet;
use crate::types::{Address, Amount, TransferError};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    /// Value received by each recipient
    balances: BTreeMap<Address, Amount>,
    /// Committed transfers in order
    journal: Vec<(Address, Amount)>,
    /// Recipients whose transfers fail
    rejecting: HashSet<Address>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host whose transfers to any of `recipients` fail
    pub fn rejecting<I>(recipients: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        Self {
            rejecting: recipients.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn reject(&mut self, recipient: Address) {
        self.rejecting.insert(recipient);
    }

    pub fn accept(&mut self, recipient: &Address) {
        self.rejecting.remove(recipient);
    }

    /// Total value received by `recipient`
    pub fn balance_of(&self, recipient: &Address) -> Amount {
        self.balances.get(recipient).copied().unwrap_or_default()
    }

    /// Value received per recipient, sorted by identity
    pub fn balances(&self) -> &BTreeMap<Address, Amount> {
        &self.balances
    }

    /// Transfers that have not been rolled back, in order
    pub fn transfers(&self) -> &[(Address, Amount)] {
        &self.journal
    }
}

impl ValueTransfer for InMemoryHost {
    fn transfer(
        &mut self,
        _wallet: &mut MultiSigWallet,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if self.rejecting.contains(&recipient) {
            return Err(TransferError::Rejected { recipient });
        }

        let balance = self.balances.entry(recipient).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(TransferError::Overflow { recipient })?;
        self.journal.push((recipient, amount));

        debug!(recipient = %recipient, amount, "Host credited recipient");
        Ok(())
    }

    fn checkpoint(&self) -> usize {
        self.journal.len()
    }

    fn rollback(&mut self, checkpoint: usize) {
        if checkpoint >= self.journal.len() {
            return;
        }

        for (recipient, amount) in self.journal.drain(checkpoint..) {
            if let Some(balance) = self.balances.get_mut(&recipient) {
                *balance -= amount;
                if *balance == 0 {
                    self.balances.remove(&recipient);
                }
            }
        }
    }
}
