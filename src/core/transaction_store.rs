//! Transaction storage
//!
//! This module provides the TransactionStore component that holds every
//! proposal ever created, indexed by its sequential id. Ids are assigned from
//! zero in creation order and are never reused or reordered, so the store is
//! a plain vector and an id doubles as its index.
//!
//! Creating a transaction also records the creator's implicit approval in the
//! [`ApprovalLedger`], which is why new transactions start with an approval
//! count of one.

use crate::core::approval_ledger::ApprovalLedger;
use crate::core::owner_registry::OwnerRegistry;
use crate::types::{Address, Amount, Transaction, TransactionId, TransactionKind, WalletError};

/// Sequentially indexed proposal store
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Create a new empty transaction store
    pub fn new() -> Self {
        TransactionStore {
            transactions: Vec::new(),
        }
    }

    /// Propose sending `amount` to `recipient`
    ///
    /// # Returns
    ///
    /// The id of the new transaction
    ///
    /// # Errors
    ///
    /// - `CallerNotOwner` if `caller` is not an owner
    /// - `ZeroAddress` if `recipient` is the null identity
    pub fn create_send(
        &mut self,
        registry: &OwnerRegistry,
        ledger: &mut ApprovalLedger,
        caller: Address,
        amount: Amount,
        recipient: Address,
    ) -> Result<TransactionId, WalletError> {
        registry.ensure_owner(&caller)?;

        if recipient.is_zero() {
            return Err(WalletError::ZeroAddress);
        }

        Ok(self.insert(ledger, caller, TransactionKind::Send { amount, recipient }))
    }

    /// Propose splitting the balance among the owners
    ///
    /// # Errors
    ///
    /// - `CallerNotOwner` if `caller` is not an owner
    pub fn create_withdraw(
        &mut self,
        registry: &OwnerRegistry,
        ledger: &mut ApprovalLedger,
        caller: Address,
    ) -> Result<TransactionId, WalletError> {
        registry.ensure_owner(&caller)?;

        Ok(self.insert(ledger, caller, TransactionKind::Withdraw))
    }

    fn insert(
        &mut self,
        ledger: &mut ApprovalLedger,
        creator: Address,
        kind: TransactionKind,
    ) -> TransactionId {
        let id = self.transactions.len();

        self.transactions.push(Transaction {
            id,
            kind,
            approval_count: 1,
            executed: false,
        });
        ledger.record(creator, id);

        id
    }

    /// Look up a transaction
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` if no transaction with this id was created
    pub fn get(&self, id: TransactionId) -> Result<&Transaction, WalletError> {
        self.transactions
            .get(id)
            .ok_or_else(|| WalletError::transaction_not_found(id))
    }

    pub fn get_mut(&mut self, id: TransactionId) -> Result<&mut Transaction, WalletError> {
        self.transactions
            .get_mut(id)
            .ok_or_else(|| WalletError::transaction_not_found(id))
    }

    /// Number of transactions created so far
    pub fn count(&self) -> usize {
        self.transactions.len()
    }

    /// All transactions in id order
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn setup() -> (OwnerRegistry, ApprovalLedger, TransactionStore) {
        let registry = OwnerRegistry::new(vec![addr(1), addr(2), addr(3)]).unwrap();
        (registry, ApprovalLedger::new(), TransactionStore::new())
    }

    #[test]
    fn test_create_send_auto_approves_creator() {
        let (registry, mut ledger, mut store) = setup();

        let id = store
            .create_send(&registry, &mut ledger, addr(1), 10, addr(9))
            .unwrap();

        let tx = store.get(id).unwrap();
        assert_eq!(id, 0);
        assert_eq!(
            tx.kind,
            TransactionKind::Send {
                amount: 10,
                recipient: addr(9)
            }
        );
        assert_eq!(tx.approval_count, 1);
        assert!(!tx.executed);
        assert!(ledger.is_approved(&addr(1), id));
        assert!(!ledger.is_approved(&addr(2), id));
    }

    #[test]
    fn test_ids_are_sequential() {
        let (registry, mut ledger, mut store) = setup();

        let first = store
            .create_send(&registry, &mut ledger, addr(1), 1, addr(9))
            .unwrap();
        let second = store.create_withdraw(&registry, &mut ledger, addr(2)).unwrap();
        let third = store
            .create_send(&registry, &mut ledger, addr(3), 0, addr(9))
            .unwrap();

        assert_eq!((first, second, third), (0, 1, 2));
        assert_eq!(store.count(), 3);
        assert_eq!(store.get(1).unwrap().kind, TransactionKind::Withdraw);
        assert!(ledger.is_approved(&addr(2), 1));
    }

    #[test]
    fn test_create_requires_owner() {
        let (registry, mut ledger, mut store) = setup();

        let send = store.create_send(&registry, &mut ledger, addr(7), 1, addr(9));
        let withdraw = store.create_withdraw(&registry, &mut ledger, addr(7));

        assert_eq!(send.unwrap_err(), WalletError::CallerNotOwner { caller: addr(7) });
        assert_eq!(
            withdraw.unwrap_err(),
            WalletError::CallerNotOwner { caller: addr(7) }
        );
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_create_send_rejects_null_recipient() {
        let (registry, mut ledger, mut store) = setup();

        let result = store.create_send(&registry, &mut ledger, addr(1), 1, Address::ZERO);

        assert_eq!(result.unwrap_err(), WalletError::ZeroAddress);
        assert_eq!(store.count(), 0);
        assert!(!ledger.is_approved(&addr(1), 0));
    }

    #[test]
    fn test_owner_may_be_recipient() {
        let (registry, mut ledger, mut store) = setup();
        assert!(store
            .create_send(&registry, &mut ledger, addr(1), 1, addr(2))
            .is_ok());
    }

    #[test]
    fn test_get_unknown_id() {
        let (_, _, mut store) = setup();
        assert_eq!(
            store.get(0).unwrap_err(),
            WalletError::TransactionNotFound { id: 0 }
        );
        assert!(store.get_mut(42).is_err());
    }
}
