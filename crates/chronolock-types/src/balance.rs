//! Balance tracking types for the custodial ledger.
//!
//! Every owner has an `available` balance (spendable) and a `held` balance
//! (removed from spendable and held by the escrow pending release).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single balance entry for an owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Spendable balance.
    pub available: Decimal,
    /// Custodially held balance, backing one or more active locks.
    pub held: Decimal,
}

impl BalanceEntry {
    /// Create a zero balance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: Decimal::ZERO,
            held: Decimal::ZERO,
        }
    }

    /// Total balance (available + held).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.available + self.held
    }

    /// Whether this entry has no balance at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.available.is_zero() && self.held.is_zero()
    }
}

impl Default for BalanceEntry {
    fn default() -> Self {
        Self::new()
    }
}
