//! Wallet funding service.

use rust_decimal::Decimal;
use tracing::{error, info, warn};
use tuition_shared::types::UserId;

use super::error::WalletError;
use crate::ledger::{
    LedgerStore, LedgerUnitOfWork, NewWalletTransaction, WalletTransaction, WalletTransactionKind,
    fits_money_scale,
};

/// Validates a top-up amount.
///
/// # Errors
///
/// Returns `WalletError::NonPositiveAmount` for zero or negative amounts and
/// `WalletError::ExcessPrecision` for amounts finer than the ledger stores.
pub fn validate_funding_amount(amount: Decimal) -> Result<Decimal, WalletError> {
    if amount <= Decimal::ZERO {
        return Err(WalletError::NonPositiveAmount(amount));
    }
    if !fits_money_scale(amount) {
        return Err(WalletError::ExcessPrecision(amount));
    }
    Ok(amount)
}

/// Credits wallets under the same locking discipline as enrollment.
#[derive(Debug, Clone)]
pub struct WalletService<S> {
    store: S,
}

impl<S: LedgerStore> WalletService<S> {
    /// Creates a new wallet service.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds `amount` to the user's wallet and writes a funding statement line.
    ///
    /// # Errors
    ///
    /// Returns `WalletError` if the amount is invalid, the user is unknown, or
    /// the store fails. Nothing is credited on error.
    pub async fn fund(
        &self,
        user_id: UserId,
        amount: Decimal,
    ) -> Result<WalletTransaction, WalletError> {
        let amount = validate_funding_amount(amount)?;

        let mut unit = self.store.begin().await?;
        match Self::credit(&mut unit, user_id, amount).await {
            Ok(line) => {
                unit.commit().await.map_err(|e| {
                    error!(%user_id, error = %e, "Failed to commit wallet funding");
                    WalletError::from(e)
                })?;
                info!(%user_id, %amount, balance_after = %line.balance_after, "Wallet funded");
                Ok(line)
            }
            Err(err) => {
                if let Err(rollback_err) = unit.rollback().await {
                    warn!(%user_id, error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn credit(
        unit: &mut S::Unit,
        user_id: UserId,
        amount: Decimal,
    ) -> Result<WalletTransaction, WalletError> {
        let wallet = unit
            .lock_wallet(user_id)
            .await?
            .ok_or(WalletError::UserNotFound(user_id))?;

        let balance_after = wallet.balance + amount;
        unit.update_balance(user_id, balance_after).await?;

        let line = unit
            .record_transaction(NewWalletTransaction {
                user_id,
                kind: WalletTransactionKind::Funding,
                amount,
                balance_after,
                enrollment_id: None,
                description: "Wallet top-up".to_string(),
            })
            .await?;

        Ok(line)
    }
}
