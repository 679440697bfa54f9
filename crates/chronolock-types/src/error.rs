//! Error types for the Chronolock escrow engine.
//!
//! All errors use the `CL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Lock / validation errors
//! - 2xx: Custody errors
//! - 9xx: General / internal errors
//!
//! Each failure kind maps to a distinct, stable code so client tooling can
//! branch on cause (retry-worthy `InsufficientFunds` vs. permanent
//! `LockAlreadyExpired`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{ChainTag, OwnerId};

/// Central error enum for all Chronolock operations.
#[derive(Debug, Error)]
pub enum ChronolockError {
    // =================================================================
    // Lock / Validation Errors (1xx)
    // =================================================================
    /// No lock exists for the `(owner, chain)` pair.
    #[error("CL_ERR_100: No lock found for {owner} on chain {chain}")]
    LockNotFound { owner: OwnerId, chain: ChainTag },

    /// A lock already exists for the `(owner, chain)` pair.
    #[error("CL_ERR_101: Lock already exists for {owner} on chain {chain}")]
    DuplicateLock { owner: OwnerId, chain: ChainTag },

    /// The lock exists but its unlock deadline has not been reached.
    #[error("CL_ERR_102: Lock not mature until {deadline}")]
    LockNotMature { deadline: DateTime<Utc> },

    /// Extension attempted at or after the lock's maturity.
    #[error("CL_ERR_103: Lock already expired at {deadline}; unlock and re-lock instead")]
    LockAlreadyExpired { deadline: DateTime<Utc> },

    /// A zero lock duration or extension was requested.
    #[error("CL_ERR_104: Lock duration must be a positive number of hours")]
    InvalidDuration,

    /// A non-positive lock amount was requested.
    #[error("CL_ERR_105: Lock amount must be strictly positive, got {amount}")]
    InvalidAmount { amount: Decimal },

    /// The chain tag is empty.
    #[error("CL_ERR_106: Chain tag must be non-empty")]
    InvalidChainTag,

    /// Cumulative lock hours would exceed the configured cap.
    #[error("CL_ERR_107: Lock duration {requested}h exceeds maximum {max}h")]
    LockTooLong { requested: u32, max: u32 },

    // =================================================================
    // Custody Errors (2xx)
    // =================================================================
    /// Not enough spendable balance to place the custodial hold.
    #[error("CL_ERR_200: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    /// A release was requested for more than is custodially held.
    #[error("CL_ERR_201: Insufficient held balance for release")]
    InsufficientHeld,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("CL_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("CL_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (store backend).
    #[error("CL_ERR_902: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ChronolockError>;

// Conversion from std::io::Error
impl From<std::io::Error> for ChronolockError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// Conversion from serde_json::Error (store snapshot encode/decode)
impl From<serde_json::Error> for ChronolockError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
