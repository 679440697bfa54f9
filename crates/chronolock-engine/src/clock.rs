//! Injected time source.
//!
//! Maturity checks must always read time through the engine's [`Clock`],
//! never `Utc::now()` directly: hosts with block-time semantics implement
//! the trait over their block timestamp, and tests drive deadlines with
//! [`ManualClock`].

use std::{cell::Cell, rc::Rc};

use chrono::{DateTime, Duration, Utc};

/// Supplies current logical time, monotonic within a single operation's
/// observation.
pub trait Clock {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable logical clock. Clones share the same underlying instant, so a
/// test can hold one handle while the engine owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock fixed at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute instant. Time never moves backwards; setting an
    /// earlier instant is ignored.
    pub fn set(&self, to: DateTime<Utc>) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }

    /// Advance by a duration.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
