//! System-wide constants for the Chronolock escrow engine.

/// Default upper bound on a lock's cumulative hours (one year).
pub const DEFAULT_MAX_LOCK_HOURS: u32 = 8760;

/// Minimum lock duration and minimum extension, in hours.
pub const MIN_LOCK_HOURS: u32 = 1;
