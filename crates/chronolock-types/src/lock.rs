//! # Lock — the escrowed position
//!
//! A `Lock` records funds held in custody for a bounded duration. It is
//! created by a successful create-lock operation, mutated only by extension
//! (`lock_time` reset, `lock_hours` incremented), and destroyed by a
//! successful unlock, which also releases the custodial hold.
//!
//! ## Lifecycle
//!
//! ```text
//!   ┌─────────┐  extend (before deadline)
//!   │ LOCKED  │◀─────────────┐
//!   └───┬─────┘──────────────┘
//!       │ unlock (at/after deadline)
//!       ▼
//!   ┌──────────┐
//!   │ RELEASED │  (record deleted, hold released)
//!   └──────────┘
//! ```
//!
//! There is no other mutation path: a stored Lock with `amount > 0` and
//! `lock_hours > 0` stays exactly as written until extended or released.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ChainTag, OwnerId};

/// A record of funds held in escrow for a bounded duration.
///
/// Keyed by `(owner, chain)`: at most one live Lock per pair. The lock
/// store is the single source of truth for "is there an outstanding hold"
/// — a custodial hold exists iff the Lock is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// The depositor whose funds are held.
    pub owner: OwnerId,
    /// Escrowed quantity. Strictly positive; denomination fixed per lock.
    pub amount: Decimal,
    /// Destination/context tag; second half of the lock key.
    pub chain: ChainTag,
    /// When the lock was created or last extended.
    pub lock_time: DateTime<Utc>,
    /// Cumulative hours the funds are held from `lock_time`.
    pub lock_hours: u32,
}

impl Lock {
    /// Earliest time at which this lock may be released:
    /// `lock_time + lock_hours`.
    #[must_use]
    pub fn unlock_deadline(&self) -> DateTime<Utc> {
        self.lock_time + Duration::hours(i64::from(self.lock_hours))
    }

    /// A lock is unlockable iff `now >= unlock_deadline`.
    #[must_use]
    pub fn is_unlockable(&self, now: DateTime<Utc>) -> bool {
        now >= self.unlock_deadline()
    }

    /// Time left until maturity, or zero if already mature.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.unlock_deadline() - now).max(Duration::zero())
    }

    /// Apply an extension: restart the window at `now` over the incremented
    /// cumulative hours. The new deadline is `now + (lock_hours_old +
    /// additional_hours)`, which is at or past the old deadline whenever the
    /// extension happens strictly before maturity — the engine enforces
    /// that precondition.
    pub fn apply_extension(&mut self, now: DateTime<Utc>, additional_hours: u32) {
        self.lock_time = now;
        self.lock_hours += additional_hours;
    }
}

/// Dummy Lock for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Lock {
    /// Create a dummy lock anchored at `lock_time` for unit tests.
    pub fn dummy(chain: &str, amount: Decimal, lock_time: DateTime<Utc>, lock_hours: u32) -> Self {
        Self {
            owner: OwnerId::new(),
            amount,
            chain: ChainTag::new(chain),
            lock_time,
            lock_hours,
        }
    }
}
