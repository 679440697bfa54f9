//! In-memory owner ledger with available/held accounting.
//!
//! All mutations are atomic: either the full movement succeeds or the
//! balance is unchanged.

use std::collections::HashMap;

use chronolock_types::{BalanceEntry, ChronolockError, OwnerId, Result};
use rust_decimal::Decimal;

use crate::custodian::FundsCustodian;

/// In-memory [`FundsCustodian`] keyed by owner.
///
/// The ledger is the source of truth for balance state. Chronolock locks a
/// single native denomination, so entries are keyed by `OwnerId` alone.
pub struct LedgerCustodian {
    /// Per-owner balances.
    balances: HashMap<OwnerId, BalanceEntry>,
}

impl LedgerCustodian {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Deposit funds (increases the spendable balance).
    pub fn deposit(&mut self, owner: OwnerId, amount: Decimal) {
        let entry = self.balances.entry(owner).or_default();
        entry.available += amount;
    }

    /// Get the balance for an owner.
    #[must_use]
    pub fn balance(&self, owner: OwnerId) -> BalanceEntry {
        self.balances.get(&owner).cloned().unwrap_or_default()
    }

    /// Total supply across all owners (available + held).
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.balances.values().map(BalanceEntry::total).sum()
    }
}

impl FundsCustodian for LedgerCustodian {
    fn hold(&mut self, owner: OwnerId, amount: Decimal) -> Result<()> {
        let entry =
            self.balances
                .get_mut(&owner)
                .ok_or(ChronolockError::InsufficientFunds {
                    needed: amount,
                    available: Decimal::ZERO,
                })?;

        if entry.available < amount {
            return Err(ChronolockError::InsufficientFunds {
                needed: amount,
                available: entry.available,
            });
        }

        entry.available -= amount;
        entry.held += amount;
        Ok(())
    }

    fn release(&mut self, owner: OwnerId, amount: Decimal) -> Result<()> {
        let entry = self
            .balances
            .get_mut(&owner)
            .ok_or(ChronolockError::InsufficientHeld)?;

        if entry.held < amount {
            return Err(ChronolockError::InsufficientHeld);
        }

        entry.held -= amount;
        entry.available += amount;
        Ok(())
    }

    fn held(&self, owner: OwnerId) -> Decimal {
        self.balances
            .get(&owner)
            .map_or(Decimal::ZERO, |entry| entry.held)
    }
}

impl Default for LedgerCustodian {
    fn default() -> Self {
        Self::new()
    }
}
