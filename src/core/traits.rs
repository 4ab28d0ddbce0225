//! Host capabilities used by the wallet
//!
//! The wallet never moves value itself. It asks the host environment to do so
//! through [`ValueTransfer`], which is passed explicitly to every execution.

use crate::core::wallet::MultiSigWallet;
use crate::types::{Address, Amount, TransferError};

/// The host's value-transfer primitive
///
/// A transfer hands control to the recipient before returning. The recipient
/// may call back into any wallet operation through the `wallet` reference it
/// is given, which is how reentrancy reaches the wallet.
///
/// Implementations also provide the host's all-or-nothing guarantee for
/// their own side effects: when an invocation fails, the wallet rolls the
/// host back to the checkpoint taken when that invocation started.
pub trait ValueTransfer {
    /// Move `amount` to `recipient`
    ///
    /// The wallet has already debited its balance when this is called.
    fn transfer(
        &mut self,
        wallet: &mut MultiSigWallet,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Mark the current host state
    fn checkpoint(&self) -> usize;

    /// Undo every transfer made after `checkpoint`
    fn rollback(&mut self, checkpoint: usize);
}
