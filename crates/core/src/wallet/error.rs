//! Wallet error types.

use rust_decimal::Decimal;
use thiserror::Error;
use tuition_shared::AppError;
use tuition_shared::types::UserId;

use crate::ledger::StoreError;

/// Errors that can occur while funding a wallet.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// Funding amount must be greater than zero.
    #[error("Funding amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Funding amount has more decimal places than the ledger stores.
    #[error("Funding amount has more than 4 decimal places: {0}")]
    ExcessPrecision(Decimal),

    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Persistence failure; nothing was credited.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl WalletError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::ExcessPrecision(_) => "AMOUNT_TOO_PRECISE",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::Infrastructure(_) => "INFRASTRUCTURE_ERROR",
        }
    }
}

impl From<StoreError> for WalletError {
    fn from(err: StoreError) -> Self {
        Self::Infrastructure(err.to_string())
    }
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::NonPositiveAmount(_) | WalletError::ExcessPrecision(_) => {
                Self::Validation(err.to_string())
            }
            WalletError::UserNotFound(_) => Self::NotFound(err.to_string()),
            WalletError::Infrastructure(msg) => Self::Infrastructure(msg),
        }
    }
}
