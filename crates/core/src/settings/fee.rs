//! Enrollment fee rules.
//!
//! The fee is one flat amount for every course, read from settings. It is not
//! the course `price`.

use rust_decimal::Decimal;

use super::error::SettingsError;
use crate::ledger::fits_money_scale;

/// Fee charged when settings carry no value.
pub const DEFAULT_ENROLLMENT_FEE: Decimal = Decimal::ZERO;

/// Validates a fee before it is written to settings.
///
/// # Errors
///
/// Returns `SettingsError::NegativeFee` for amounts below zero and
/// `SettingsError::ExcessPrecision` for amounts the ledger would round.
pub fn validate_enrollment_fee(fee: Decimal) -> Result<Decimal, SettingsError> {
    if fee.is_sign_negative() && !fee.is_zero() {
        return Err(SettingsError::NegativeFee(fee));
    }
    if !fits_money_scale(fee) {
        return Err(SettingsError::ExcessPrecision(fee));
    }
    Ok(fee.normalize())
}

/// Turns the stored value into the fee to charge.
///
/// `None` means the fee was never configured and falls back to
/// `DEFAULT_ENROLLMENT_FEE`.
///
/// # Errors
///
/// Returns `SettingsError::NegativeFee` if the stored value is negative.
pub fn resolve_enrollment_fee(stored: Option<Decimal>) -> Result<Decimal, SettingsError> {
    stored.map_or(Ok(DEFAULT_ENROLLMENT_FEE), validate_enrollment_fee)
}
