//! Owner registry
//!
//! This module provides the `OwnerRegistry`, the ordered set of identities
//! allowed to propose, approve and execute transactions. Its size is the
//! denominator of every quorum check.
//!
//! The order of the sequence is preserved exactly as supplied and is only
//! observable when a Withdraw iterates owners to distribute the balance.

use crate::types::{Address, WalletError};
use std::collections::HashSet;

/// Ordered set of owner identities
///
/// Never empty after construction. No slot holds a duplicate identity, and
/// construction rejects the null identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRegistry {
    owners: Vec<Address>,
}

impl OwnerRegistry {
    /// Build a registry from the initial owners
    ///
    /// # Errors
    ///
    /// - `EmptyOwnerSet` if `owners` is empty
    /// - `ZeroAddress` if any identity is null
    /// - `DuplicateOwner` naming the first identity that repeats
    pub fn new(owners: Vec<Address>) -> Result<Self, WalletError> {
        if owners.is_empty() {
            return Err(WalletError::EmptyOwnerSet);
        }

        let mut seen = HashSet::with_capacity(owners.len());
        for owner in &owners {
            if owner.is_zero() {
                return Err(WalletError::ZeroAddress);
            }
            if !seen.insert(*owner) {
                return Err(WalletError::duplicate_owner(*owner));
            }
        }

        Ok(OwnerRegistry { owners })
    }

    pub fn is_owner(&self, identity: &Address) -> bool {
        self.owners.contains(identity)
    }

    /// Fail with `CallerNotOwner` unless `caller` is in the registry
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), WalletError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(WalletError::caller_not_owner(*caller))
        }
    }

    /// Number of current owners (never zero)
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Owners in registry order
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    /// Overwrite the caller's slot with `replacement`, keeping its position
    ///
    /// A null `replacement` is accepted. Approvals recorded under the old
    /// identity are left untouched.
    ///
    /// # Errors
    ///
    /// - `CallerNotOwner` if `caller` is not in the registry
    /// - `DuplicateOwner` if `replacement` is already in the registry
    pub fn replace(&mut self, caller: &Address, replacement: Address) -> Result<(), WalletError> {
        let slot = self
            .owners
            .iter()
            .position(|owner| owner == caller)
            .ok_or_else(|| WalletError::caller_not_owner(*caller))?;

        if self.is_owner(&replacement) {
            return Err(WalletError::duplicate_owner(replacement));
        }

        self.owners[slot] = replacement;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    #[test]
    fn test_new_preserves_order() {
        let registry = OwnerRegistry::new(vec![addr(3), addr(1), addr(2)]).unwrap();
        assert_eq!(registry.owners(), &[addr(3), addr(1), addr(2)]);
        assert_eq!(registry.len(), 3);
    }

    #[rstest]
    #[case::empty(vec![], WalletError::EmptyOwnerSet)]
    #[case::zero(vec![addr(1), Address::ZERO], WalletError::ZeroAddress)]
    #[case::duplicate(vec![addr(1), addr(2), addr(1)], WalletError::DuplicateOwner { owner: addr(1) })]
    fn test_new_rejects_invalid_sets(#[case] owners: Vec<Address>, #[case] expected: WalletError) {
        assert_eq!(OwnerRegistry::new(owners).unwrap_err(), expected);
    }

    #[test]
    fn test_single_owner_is_allowed() {
        let registry = OwnerRegistry::new(vec![addr(1)]).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_is_owner_tracks_membership() {
        let registry = OwnerRegistry::new(vec![addr(1), addr(2)]).unwrap();
        assert!(registry.is_owner(&addr(1)));
        assert!(registry.is_owner(&addr(2)));
        assert!(!registry.is_owner(&addr(3)));
        assert!(!registry.is_owner(&Address::ZERO));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut registry = OwnerRegistry::new(vec![addr(1), addr(2), addr(3)]).unwrap();
        registry.replace(&addr(2), addr(9)).unwrap();

        assert_eq!(registry.owners(), &[addr(1), addr(9), addr(3)]);
        assert!(!registry.is_owner(&addr(2)));
        assert!(registry.is_owner(&addr(9)));
    }

    #[test]
    fn test_replace_requires_owner() {
        let mut registry = OwnerRegistry::new(vec![addr(1), addr(2)]).unwrap();
        let result = registry.replace(&addr(5), addr(9));
        assert_eq!(result.unwrap_err(), WalletError::CallerNotOwner { caller: addr(5) });
    }

    #[rstest]
    #[case::other_owner(addr(2))]
    #[case::itself(addr(1))]
    fn test_replace_rejects_existing_owner(#[case] replacement: Address) {
        let mut registry = OwnerRegistry::new(vec![addr(1), addr(2)]).unwrap();
        let result = registry.replace(&addr(1), replacement);
        assert_eq!(
            result.unwrap_err(),
            WalletError::DuplicateOwner { owner: replacement }
        );
        assert_eq!(registry.owners(), &[addr(1), addr(2)]);
    }

    #[test]
    fn test_replace_accepts_null_identity() {
        let mut registry = OwnerRegistry::new(vec![addr(1), addr(2)]).unwrap();
        registry.replace(&addr(1), Address::ZERO).unwrap();
        assert!(registry.is_owner(&Address::ZERO));
        assert_eq!(registry.len(), 2);
    }
}
