//! The Funds Custodian contract consumed by the escrow engine.

use chronolock_types::{OwnerId, Result};
use rust_decimal::Decimal;

/// Escrow-side custody of an owner's balance.
///
/// `hold` moves funds out of the owner's spendable balance into custody;
/// `release` moves them back. Both must be all-or-nothing: a failed call
/// leaves the ledger exactly as it was. The engine relies on this to keep
/// the lock store and the custodial ledger coupled — a hold exists iff the
/// corresponding lock is stored.
pub trait FundsCustodian {
    /// Move `amount` from the owner's spendable balance into escrow custody.
    ///
    /// # Errors
    /// Returns [`ChronolockError::InsufficientFunds`] if the spendable
    /// balance cannot cover `amount`.
    ///
    /// [`ChronolockError::InsufficientFunds`]: chronolock_types::ChronolockError::InsufficientFunds
    fn hold(&mut self, owner: OwnerId, amount: Decimal) -> Result<()>;

    /// Move `amount` from escrow custody back to the owner's spendable
    /// balance.
    ///
    /// # Errors
    /// Returns [`ChronolockError::InsufficientHeld`] if less than `amount`
    /// is currently held for the owner.
    ///
    /// [`ChronolockError::InsufficientHeld`]: chronolock_types::ChronolockError::InsufficientHeld
    fn release(&mut self, owner: OwnerId, amount: Decimal) -> Result<()>;

    /// Amount currently held in custody for the owner. Observational;
    /// used by invariant checks (store/custody coupling).
    fn held(&self, owner: OwnerId) -> Decimal;
}
