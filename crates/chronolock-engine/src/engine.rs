//! The escrow engine: validates and applies lock-create, extend, and unlock
//! operations against the lock store.
//!
//! ## Atomicity
//!
//! Each operation is one unit of work. Validation failures are raised
//! before any custodial side effect; a custodian failure leaves the store
//! untouched; a store failure after a custodial movement triggers a
//! compensating movement in the opposite direction. After any operation
//! completes — success or failure — a lock exists in the store iff the
//! custodian holds funds for that `(owner, chain)` pair.
//!
//! ## Trigger uniformity
//!
//! Scheduler-fired callbacks re-enter [`EscrowEngine::unlock`], the same
//! validated path user calls take. Maturity is always re-checked against
//! the *current* stored deadline at fire time: a callback scheduled before
//! an extension correctly rejects with `LockNotMature` and is absorbed as a
//! no-op, and a duplicate delivery after release finds no lock.

use chronolock_custody::FundsCustodian;
use chronolock_types::{
    ChainTag, ChronolockError, EngineConfig, EscrowEvent, Lock, OwnerId, Result, constants,
};
use rust_decimal::Decimal;

use crate::clock::Clock;
use crate::scheduler::{UnlockRequest, UnlockScheduler};
use crate::sink::EventSink;
use crate::store::LockStore;

/// Validates and applies escrow operations.
///
/// The store, clock, scheduler, and event sink are injected at
/// construction; the custodian is passed per call. No ambient state.
pub struct EscrowEngine<S, C, Q, E>
where
    S: LockStore,
    C: Clock,
    Q: UnlockScheduler,
    E: EventSink,
{
    store: S,
    clock: C,
    scheduler: Q,
    events: E,
    config: EngineConfig,
}

impl<S, C, Q, E> EscrowEngine<S, C, Q, E>
where
    S: LockStore,
    C: Clock,
    Q: UnlockScheduler,
    E: EventSink,
{
    /// Create an engine over the given collaborators.
    pub fn new(store: S, clock: C, scheduler: Q, events: E, config: EngineConfig) -> Self {
        Self {
            store,
            clock,
            scheduler,
            events,
            config,
        }
    }

    /// Lock `amount` for `duration_hours`, holding the funds in custody.
    ///
    /// Validation order: chain tag, amount, duration, duration cap,
    /// duplicate — all before the custodial hold is attempted. If the store
    /// write fails after the hold, the hold is rolled back.
    ///
    /// # Errors
    /// `InvalidChainTag`, `InvalidAmount`, `InvalidDuration`, `LockTooLong`,
    /// `DuplicateLock`, or the custodian's `InsufficientFunds`.
    pub fn create_lock(
        &mut self,
        custodian: &mut impl FundsCustodian,
        owner: OwnerId,
        chain: ChainTag,
        amount: Decimal,
        duration_hours: u32,
    ) -> Result<Lock> {
        if chain.is_empty() {
            return Err(ChronolockError::InvalidChainTag);
        }
        if amount <= Decimal::ZERO {
            return Err(ChronolockError::InvalidAmount { amount });
        }
        if duration_hours < constants::MIN_LOCK_HOURS {
            return Err(ChronolockError::InvalidDuration);
        }
        if duration_hours > self.config.max_lock_hours {
            return Err(ChronolockError::LockTooLong {
                requested: duration_hours,
                max: self.config.max_lock_hours,
            });
        }
        if self.store.get(owner, &chain)?.is_some() {
            return Err(ChronolockError::DuplicateLock { owner, chain });
        }

        // Hold first: if the custodian rejects, no state has changed.
        custodian.hold(owner, amount)?;

        let lock = Lock {
            owner,
            amount,
            chain: chain.clone(),
            lock_time: self.clock.now(),
            lock_hours: duration_hours,
        };

        if let Err(err) = self.store.put(lock.clone()) {
            // Compensate: the hold must not outlive a failed store write.
            roll_back_hold(custodian, owner, amount, &err)?;
            return Err(err);
        }

        let deadline = lock.unlock_deadline();
        self.events.emit(&EscrowEvent::UnlockScheduled {
            owner,
            chain: chain.clone(),
            deadline,
        });
        self.scheduler
            .schedule(deadline, UnlockRequest { owner, chain })?;

        tracing::info!(
            %owner,
            chain = %lock.chain,
            amount = %lock.amount,
            hours = lock.lock_hours,
            %deadline,
            "lock created"
        );
        Ok(lock)
    }

    /// Release a mature lock: move the held funds back to the owner's
    /// spendable balance and delete the record.
    ///
    /// Non-idempotent by design: after a successful unlock the record is
    /// gone, so a second call fails with `LockNotFound`. Scheduler-fired
    /// and user-initiated calls go through this same path.
    ///
    /// # Errors
    /// `LockNotFound`, `LockNotMature`, or the custodian's error kind (the
    /// lock is left intact on custodian failure).
    pub fn unlock(
        &mut self,
        custodian: &mut impl FundsCustodian,
        owner: OwnerId,
        chain: &ChainTag,
    ) -> Result<Decimal> {
        let lock = self
            .store
            .get(owner, chain)?
            .ok_or(ChronolockError::LockNotFound {
                owner,
                chain: chain.clone(),
            })?;

        let now = self.clock.now();
        if !lock.is_unlockable(now) {
            return Err(ChronolockError::LockNotMature {
                deadline: lock.unlock_deadline(),
            });
        }

        // Release first; on failure the lock stays intact (no partial
        // release).
        custodian.release(owner, lock.amount)?;

        if let Err(err) = self.store.delete(owner, chain) {
            // Compensate: re-hold so the ledger still matches the store.
            custodian
                .hold(owner, lock.amount)
                .map_err(|hold_err| compensation_failure(&err, &hold_err))?;
            return Err(err);
        }

        tracing::info!(%owner, %chain, amount = %lock.amount, "lock released");
        Ok(lock.amount)
    }

    /// Extend a live lock: restart the window at `now` over the incremented
    /// cumulative hours, then schedule a fresh callback at the new
    /// deadline. The superseded callback becomes a no-op when it fires.
    ///
    /// # Errors
    /// `LockNotFound`, `InvalidDuration`, `LockAlreadyExpired` (extension
    /// is only legal strictly before maturity), or `LockTooLong`.
    pub fn extend_lock(
        &mut self,
        owner: OwnerId,
        chain: &ChainTag,
        additional_hours: u32,
    ) -> Result<Lock> {
        let mut lock = self
            .store
            .get(owner, chain)?
            .ok_or(ChronolockError::LockNotFound {
                owner,
                chain: chain.clone(),
            })?;

        if additional_hours < constants::MIN_LOCK_HOURS {
            return Err(ChronolockError::InvalidDuration);
        }

        let now = self.clock.now();
        let old_deadline = lock.unlock_deadline();
        if now >= old_deadline {
            return Err(ChronolockError::LockAlreadyExpired {
                deadline: old_deadline,
            });
        }

        let total = lock
            .lock_hours
            .checked_add(additional_hours)
            .filter(|total| *total <= self.config.max_lock_hours)
            .ok_or(ChronolockError::LockTooLong {
                requested: lock.lock_hours.saturating_add(additional_hours),
                max: self.config.max_lock_hours,
            })?;

        lock.apply_extension(now, additional_hours);
        debug_assert_eq!(lock.lock_hours, total);
        debug_assert!(lock.unlock_deadline() >= old_deadline);
        self.store.put(lock.clone())?;

        let deadline = lock.unlock_deadline();
        self.events.emit(&EscrowEvent::UnlockScheduled {
            owner,
            chain: chain.clone(),
            deadline,
        });
        self.scheduler.schedule(
            deadline,
            UnlockRequest {
                owner,
                chain: chain.clone(),
            },
        )?;

        tracing::info!(
            %owner,
            %chain,
            hours = lock.lock_hours,
            %deadline,
            "lock extended"
        );
        Ok(lock)
    }

    /// All locks currently stored for `chain`, in deterministic order.
    /// Read-only; may be empty.
    pub fn locks_by_chain(&self, chain: &ChainTag) -> Result<Vec<Lock>> {
        self.store.list_by_chain(chain)
    }

    /// Fetch a single lock, if present.
    pub fn get_lock(&self, owner: OwnerId, chain: &ChainTag) -> Result<Option<Lock>> {
        self.store.get(owner, chain)
    }

    /// Drain every scheduler callback that is due and run each through the
    /// validated unlock path. Returns the number of locks actually
    /// released.
    ///
    /// Duplicate or stale deliveries (`LockNotFound`, `LockNotMature`) are
    /// absorbed as debug-logged no-ops — the at-least-once delivery
    /// contract makes them expected. Custodian and internal errors
    /// propagate.
    pub fn run_scheduled(&mut self, custodian: &mut impl FundsCustodian) -> Result<usize> {
        let now = self.clock.now();
        let due = self.scheduler.due(now);
        let mut released = 0;
        for request in due {
            match self.unlock(custodian, request.owner, &request.chain) {
                Ok(amount) => {
                    released += 1;
                    tracing::info!(
                        owner = %request.owner,
                        chain = %request.chain,
                        %amount,
                        "scheduled unlock released"
                    );
                }
                Err(ChronolockError::LockNotFound { .. }) => {
                    tracing::debug!(
                        owner = %request.owner,
                        chain = %request.chain,
                        "scheduled unlock found no lock; absorbed"
                    );
                }
                Err(ChronolockError::LockNotMature { deadline }) => {
                    tracing::debug!(
                        owner = %request.owner,
                        chain = %request.chain,
                        %deadline,
                        "stale callback before current deadline; absorbed"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Ok(released)
    }

    /// The injected event sink.
    pub fn events(&self) -> &E {
        &self.events
    }

    /// The injected scheduler.
    pub fn scheduler(&self) -> &Q {
        &self.scheduler
    }

    /// The lock store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Roll a custodial hold back after a failed store write. If the rollback
/// itself fails, the ledger and store have diverged and the host must
/// intervene.
fn roll_back_hold(
    custodian: &mut impl FundsCustodian,
    owner: OwnerId,
    amount: Decimal,
    cause: &ChronolockError,
) -> Result<()> {
    custodian
        .release(owner, amount)
        .map_err(|release_err| compensation_failure(cause, &release_err))
}

fn compensation_failure(cause: &ChronolockError, rollback: &ChronolockError) -> ChronolockError {
    ChronolockError::Internal(format!(
        "store/custody divergence: operation failed ({cause}) and compensation failed ({rollback})"
    ))
}
