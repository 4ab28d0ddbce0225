//! The wallet surface
//!
//! `MultiSigWallet` owns the owner registry, the transaction store, the
//! approval ledger, the balance and the event log, and exposes every
//! operation a caller can invoke. The caller identity passed to each
//! operation is taken as authenticated by the host.
//!
//! Operations other than [`execute`](MultiSigWallet::execute) validate
//! everything before their first mutation, so a failure leaves no trace.
//! Execution is the one path that mutates state and then hands control to the
//! host; it is covered by a snapshot taken on entry (see `engine.rs`).

use crate::core::approval_ledger::ApprovalLedger;
use crate::core::config::WalletConfig;
use crate::core::owner_registry::OwnerRegistry;
use crate::core::transaction_store::TransactionStore;
use crate::types::{Address, Amount, Transaction, TransactionId, WalletError, WalletEvent};
use tracing::{debug, info, warn};

/// Everything an invocation may change
///
/// Cloned on entry to `execute` and restored if the invocation fails.
#[derive(Debug, Clone)]
pub(crate) struct WalletState {
    pub(crate) registry: OwnerRegistry,
    pub(crate) transactions: TransactionStore,
    pub(crate) approvals: ApprovalLedger,
    pub(crate) balance: Amount,
    pub(crate) events: Vec<WalletEvent>,
}

/// Multi-owner custodial wallet
#[derive(Debug)]
pub struct MultiSigWallet {
    pub(crate) state: WalletState,
    pub(crate) config: WalletConfig,
    /// Set while an execution is handing control to the host
    pub(crate) executing: bool,
}

impl MultiSigWallet {
    /// Create a wallet with the default configuration
    ///
    /// # Errors
    ///
    /// See [`OwnerRegistry::new`]
    pub fn new(owners: Vec<Address>) -> Result<Self, WalletError> {
        Self::with_config(owners, WalletConfig::default())
    }

    pub fn with_config(owners: Vec<Address>, config: WalletConfig) -> Result<Self, WalletError> {
        let registry = OwnerRegistry::new(owners)?;

        info!(
            owners = registry.len(),
            quorum = ?config.quorum,
            withdraw = ?config.withdraw,
            reentrancy_guard = config.reentrancy_guard,
            "Wallet created"
        );

        Ok(MultiSigWallet {
            state: WalletState {
                registry,
                transactions: TransactionStore::new(),
                approvals: ApprovalLedger::new(),
                balance: 0,
                events: Vec::new(),
            },
            config,
            executing: false,
        })
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn is_owner(&self, identity: &Address) -> bool {
        self.state.registry.is_owner(identity)
    }

    /// Current owners in registry order
    pub fn owners(&self) -> &[Address] {
        self.state.registry.owners()
    }

    /// Attach value to the wallet
    ///
    /// Open to any caller and not subject to the reentrancy guard, so a
    /// recipient may hand value back while a transfer is in progress.
    ///
    /// # Errors
    ///
    /// `BalanceOverflow` if the balance cannot hold the deposit
    pub fn deposit(&mut self, sender: Address, amount: Amount) -> Result<(), WalletError> {
        let balance = self.state.balance;
        let new_balance = balance
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow { balance, amount })?;

        self.state.balance = new_balance;
        self.emit(WalletEvent::Deposited {
            sender,
            amount,
            balance: new_balance,
        });

        Ok(())
    }

    /// Propose a Send of `amount` to `recipient`, approved by `caller`
    pub fn create_send(
        &mut self,
        caller: Address,
        amount: Amount,
        recipient: Address,
    ) -> Result<TransactionId, WalletError> {
        self.ensure_not_executing()?;

        let state = &mut self.state;
        let id = state.transactions.create_send(
            &state.registry,
            &mut state.approvals,
            caller,
            amount,
            recipient,
        )?;

        self.announce_created(caller, id)
    }

    /// Propose a Withdraw, approved by `caller`
    pub fn create_withdraw(&mut self, caller: Address) -> Result<TransactionId, WalletError> {
        self.ensure_not_executing()?;

        let state = &mut self.state;
        let id = state
            .transactions
            .create_withdraw(&state.registry, &mut state.approvals, caller)?;

        self.announce_created(caller, id)
    }

    fn announce_created(
        &mut self,
        creator: Address,
        id: TransactionId,
    ) -> Result<TransactionId, WalletError> {
        let kind = self.state.transactions.get(id)?.kind;

        info!(id, creator = %creator, kind = %kind, "Transaction created");
        self.emit(WalletEvent::TransactionCreated { creator, id, kind });

        Ok(id)
    }

    /// Replace the caller's registry slot with `replacement`
    ///
    /// Approvals given under the old identity stay in the ledger and keep
    /// counting under [`QuorumPolicy::AllApprovals`](crate::core::QuorumPolicy::AllApprovals).
    ///
    /// # Returns
    ///
    /// `true` once the slot has been replaced
    pub fn replace_self(
        &mut self,
        caller: Address,
        replacement: Address,
    ) -> Result<bool, WalletError> {
        self.ensure_not_executing()?;

        self.state.registry.replace(&caller, replacement)?;

        if replacement.is_zero() {
            warn!(previous = %caller, "Owner replaced itself with the zero address");
        }
        info!(previous = %caller, replacement = %replacement, "Owner address changed");
        self.emit(WalletEvent::OwnerChanged {
            previous: caller,
            replacement,
        });

        Ok(true)
    }

    pub fn approve(&mut self, caller: Address, id: TransactionId) -> Result<(), WalletError> {
        self.ensure_not_executing()?;

        let state = &mut self.state;
        state
            .approvals
            .approve(&state.registry, &mut state.transactions, caller, id)?;

        debug!(
            id,
            owner = %caller,
            approvals = state.transactions.get(id)?.approval_count,
            "Transaction approved"
        );
        self.emit(WalletEvent::Approved { owner: caller, id });

        Ok(())
    }

    pub fn remove_approval(
        &mut self,
        caller: Address,
        id: TransactionId,
    ) -> Result<(), WalletError> {
        self.ensure_not_executing()?;

        let state = &mut self.state;
        state
            .approvals
            .remove_approval(&state.registry, &mut state.transactions, caller, id)?;

        debug!(
            id,
            owner = %caller,
            approvals = state.transactions.get(id)?.approval_count,
            "Approval removed"
        );
        self.emit(WalletEvent::ApprovalRemoved { owner: caller, id });

        Ok(())
    }

    /// Whether `owner` currently approves transaction `id`
    pub fn check_approved(&self, owner: &Address, id: TransactionId) -> bool {
        self.state.approvals.is_approved(owner, id)
    }

    /// # Errors
    ///
    /// `TransactionNotFound` for an id that was never created
    pub fn get_transaction(&self, id: TransactionId) -> Result<&Transaction, WalletError> {
        self.state.transactions.get(id)
    }

    /// All transactions in id order
    pub fn transactions(&self) -> &[Transaction] {
        self.state.transactions.all()
    }

    pub fn transaction_count(&self) -> usize {
        self.state.transactions.count()
    }

    pub fn balance(&self) -> Amount {
        self.state.balance
    }

    /// Events from every invocation that succeeded, oldest first
    pub fn events(&self) -> &[WalletEvent] {
        &self.state.events
    }

    pub(crate) fn emit(&mut self, event: WalletEvent) {
        debug!(?event, "Wallet event");
        self.state.events.push(event);
    }

    /// Reject guarded operations while an execution is transferring value
    pub(crate) fn ensure_not_executing(&self) -> Result<(), WalletError> {
        if self.config.reentrancy_guard && self.executing {
            warn!("Rejected reentrant call into the wallet");
            return Err(WalletError::ReentrantCall);
        }
        Ok(())
    }
}
