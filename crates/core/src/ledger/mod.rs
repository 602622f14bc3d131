//! Wallet ledger primitives shared by enrollment and funding.
//!
//! This module defines:
//! - Wallet accounts and statement lines
//! - The unit-of-work ports implemented by the db crate
//! - Store error classification

pub mod store;
pub mod types;

pub use store::{LedgerStore, LedgerUnitOfWork, StoreError};
pub use types::{
    MONEY_SCALE, NewWalletTransaction, WalletAccount, WalletTransaction, WalletTransactionKind,
    fits_money_scale,
};
