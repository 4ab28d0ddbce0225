//! Script processor
//!
//! This module provides the `WalletProcessor` that drives a wallet from a
//! stream of [`OperationRecord`]s, the way a host would deliver invocations
//! one after another. The processor owns both the wallet and the
//! [`InMemoryHost`] it executes against.

use crate::core::config::WalletConfig;
use crate::core::host::InMemoryHost;
use crate::core::wallet::MultiSigWallet;
use crate::types::{Address, Amount, Operation, OperationRecord, Transaction, WalletError};
use std::collections::BTreeMap;
use tracing::debug;

/// Everything needed to stand up a wallet and its host
#[derive(Debug, Clone, Default)]
pub struct WalletSetup {
    pub owners: Vec<Address>,
    pub config: WalletConfig,
    /// Recipients the host refuses to pay
    pub rejecting: Vec<Address>,
}

impl WalletSetup {
    pub fn new(owners: Vec<Address>) -> Self {
        Self {
            owners,
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: WalletConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_rejecting(mut self, rejecting: Vec<Address>) -> Self {
        self.rejecting = rejecting;
        self
    }
}

/// Final state of a processed script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub balance: Amount,
    pub owners: Vec<Address>,
    /// Value received from the wallet per recipient
    pub payouts: BTreeMap<Address, Amount>,
    pub transactions: usize,
    pub events: usize,
}

/// Applies script operations to a wallet in order
#[derive(Debug)]
pub struct WalletProcessor {
    wallet: MultiSigWallet,
    host: InMemoryHost,
}

impl WalletProcessor {
    /// Create a processor for a fresh wallet
    ///
    /// # Errors
    ///
    /// Returns the wallet's construction error if the owner set is invalid
    pub fn new(setup: &WalletSetup) -> Result<Self, WalletError> {
        let wallet = MultiSigWallet::with_config(setup.owners.clone(), setup.config)?;
        let host = InMemoryHost::rejecting(setup.rejecting.iter().copied());

        Ok(Self { wallet, host })
    }

    /// Process a single operation record
    ///
    /// Routes the operation to the matching wallet call with the record's
    /// caller as the authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns whatever the wallet rejected the operation with. A rejected
    /// operation leaves the wallet unchanged, so processing can continue.
    pub fn process(&mut self, record: OperationRecord) -> Result<(), WalletError> {
        let OperationRecord { caller, operation } = record;
        debug!(op = %operation.op_type(), caller = %caller, "Processing operation");

        match operation {
            Operation::Deposit { amount } => self.wallet.deposit(caller, amount),
            Operation::Send { amount, recipient } => self
                .wallet
                .create_send(caller, amount, recipient)
                .map(|_| ()),
            Operation::Withdraw => self.wallet.create_withdraw(caller).map(|_| ()),
            Operation::Approve { tx } => self.wallet.approve(caller, tx),
            Operation::Revoke { tx } => self.wallet.remove_approval(caller, tx),
            Operation::Execute { tx } => self.wallet.execute(caller, tx, &mut self.host),
            Operation::Replace { new_owner } => {
                self.wallet.replace_self(caller, new_owner).map(|_| ())
            }
        }
    }

    pub fn wallet(&self) -> &MultiSigWallet {
        &self.wallet
    }

    pub fn host(&self) -> &InMemoryHost {
        &self.host
    }

    /// Get all stored transactions in id order
    pub fn transactions(&self) -> &[Transaction] {
        self.wallet.transactions()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            balance: self.wallet.balance(),
            owners: self.wallet.owners().to_vec(),
            payouts: self.host.balances().clone(),
            transactions: self.wallet.transaction_count(),
            events: self.wallet.events().len(),
        }
    }
}
