//! # chronolock-engine
//!
//! **Escrow engine core**: the lock store, the maturity rules, and the
//! scheduled-unlock driver.
//!
//! ## Architecture
//!
//! The engine sits between the caller (API, contract entry point) and the
//! Funds Custodian:
//! 1. **LockStore**: keyed map `(owner, chain) → Lock`, deterministic
//!    per-chain listing
//! 2. **Clock**: injected time source (wall time or host block time)
//! 3. **UnlockScheduler**: fire-time delay queue for automatic unlocks
//! 4. **EventSink**: observational notifications (`unlock_scheduled`)
//! 5. **EscrowEngine**: validates and applies create / extend / unlock
//!
//! ## Operation flow
//!
//! ```text
//! caller → EscrowEngine.create_lock() → FundsCustodian.hold()
//!        → LockStore.put() → EventSink.emit() → UnlockScheduler.schedule()
//! ```
//!
//! Scheduled callbacks re-enter the same validated unlock path — there is
//! no privileged bypass, so existence and maturity checks apply uniformly
//! regardless of trigger origin.

pub mod clock;
pub mod engine;
pub mod scheduler;
pub mod sink;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::EscrowEngine;
pub use scheduler::{DelayQueue, UnlockRequest, UnlockScheduler};
pub use sink::{EventSink, RecordingSink, TracingSink};
pub use store::{LockStore, MemoryLockStore};
