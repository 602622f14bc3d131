//! Settings error types.

use rust_decimal::Decimal;
use thiserror::Error;
use tuition_shared::AppError;

use crate::ledger::StoreError;

/// Errors that can occur while reading or changing settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Enrollment fee cannot be negative.
    #[error("Enrollment fee cannot be negative: {0}")]
    NegativeFee(Decimal),

    /// Fee has more decimal places than the ledger stores.
    #[error("Enrollment fee has more than 4 decimal places: {0}")]
    ExcessPrecision(Decimal),

    /// Persistence failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<StoreError> for SettingsError {
    fn from(err: StoreError) -> Self {
        Self::Infrastructure(err.to_string())
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::NegativeFee(_) | SettingsError::ExcessPrecision(_) => {
                Self::Validation(err.to_string())
            }
            SettingsError::Infrastructure(msg) => Self::Infrastructure(msg),
        }
    }
}
