//! Core business logic for the tuition backend.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the ports in `ledger::store`, implemented by
//! the db crate.
//!
//! # Modules
//!
//! - `enrollment` - Wallet-paid course enrollment (the ledger guard)
//! - `ledger` - Wallet accounts, statement lines and unit-of-work ports
//! - `settings` - Enrollment fee rules
//! - `wallet` - Wallet funding

pub mod enrollment;
pub mod ledger;
pub mod settings;
pub mod wallet;

#[cfg(test)]
mod testing;
