//! # chronolock-types
//!
//! Shared types, errors, and configuration for the **Chronolock** escrow
//! engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OwnerId`], [`ChainTag`]
//! - **Lock model**: [`Lock`] with its deadline arithmetic
//! - **Balance model**: [`BalanceEntry`]
//! - **Events**: [`EscrowEvent`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`ChronolockError`] with `CL_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod lock;

// Re-export all primary types at crate root for ergonomic imports:
//   use chronolock_types::{Lock, OwnerId, ChainTag, ...};

pub use balance::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use lock::*;

// Constants are accessed via `chronolock_types::constants::FOO`
// (not re-exported to avoid name collisions).
