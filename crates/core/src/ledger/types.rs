//! Wallet ledger domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tuition_shared::types::{EnrollmentId, UserId, WalletTransactionId};

/// Decimal places every stored amount carries (`NUMERIC(19,4)`).
pub const MONEY_SCALE: u32 = 4;

/// Returns true if `amount` fits in `MONEY_SCALE` decimal places without rounding.
#[must_use]
pub fn fits_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}

/// A user's wallet as seen inside a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletAccount {
    /// Wallet owner.
    pub user_id: UserId,
    /// Current balance. Never negative once persisted.
    pub balance: Decimal,
}

impl WalletAccount {
    /// Returns true if the wallet can pay `amount` without going negative.
    #[must_use]
    pub fn covers(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}

/// Kind of balance movement on a statement line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletTransactionKind {
    /// Money added to the wallet.
    Funding,
    /// Flat enrollment fee charged when joining a course.
    EnrollmentFee,
}

impl WalletTransactionKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Funding => "funding",
            Self::EnrollmentFee => "enrollment_fee",
        }
    }
}

impl fmt::Display for WalletTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement line to be written in the same unit of work as the balance change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWalletTransaction {
    /// Wallet owner.
    pub user_id: UserId,
    /// Movement kind.
    pub kind: WalletTransactionKind,
    /// Absolute amount moved (always positive).
    pub amount: Decimal,
    /// Balance after the movement.
    pub balance_after: Decimal,
    /// Enrollment that caused the charge, if any.
    pub enrollment_id: Option<EnrollmentId>,
    /// Human readable description for statements and receipts.
    pub description: String,
}

/// Persisted statement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    /// Line ID.
    pub id: WalletTransactionId,
    /// Wallet owner.
    pub user_id: UserId,
    /// Movement kind.
    pub kind: WalletTransactionKind,
    /// Absolute amount moved.
    pub amount: Decimal,
    /// Balance after the movement.
    pub balance_after: Decimal,
    /// Enrollment that caused the charge, if any.
    pub enrollment_id: Option<EnrollmentId>,
    /// Description.
    pub description: String,
    /// When the line was written.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wallet_covers() {
        let wallet = WalletAccount {
            user_id: UserId::new(),
            balance: dec!(5000),
        };
        assert!(wallet.covers(dec!(5000)));
        assert!(wallet.covers(dec!(0)));
        assert!(!wallet.covers(dec!(5000.01)));
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(WalletTransactionKind::Funding.as_str(), "funding");
        assert_eq!(WalletTransactionKind::EnrollmentFee.to_string(), "enrollment_fee");
    }

    #[test]
    fn test_money_scale() {
        assert!(fits_money_scale(dec!(5000)));
        assert!(fits_money_scale(dec!(0.0001)));
        assert!(fits_money_scale(dec!(10.50000)));
        assert!(!fits_money_scale(dec!(0.00001)));
        assert!(!fits_money_scale(dec!(10.00005)));
    }
}
