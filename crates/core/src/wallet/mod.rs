//! Wallet funding.

pub mod error;
pub mod service;

pub use error::WalletError;
pub use service::{WalletService, validate_funding_amount};
