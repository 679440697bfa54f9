//! # chronolock-custody
//!
//! **Funds Custodian capability**: escrow-side hold and release of an
//! owner's balance.
//!
//! The escrow engine consumes the [`FundsCustodian`] trait; it never touches
//! balances directly. This crate provides [`LedgerCustodian`], an in-memory
//! implementation with available/held accounting, suitable for tests and for
//! hosts without an external ledger. Hosts backed by a real ledger (bank
//! module, database) implement the trait themselves.
//!
//! ## Fund flow
//!
//! ```text
//! deposit → available ──hold──▶ held ──release──▶ available
//! ```
//!
//! Every mutation is atomic: either the full movement succeeds or the
//! balance is unchanged.

pub mod custodian;
pub mod ledger;

pub use custodian::FundsCustodian;
pub use ledger::LedgerCustodian;
