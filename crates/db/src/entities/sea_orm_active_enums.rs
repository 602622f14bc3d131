//! Postgres enum types and their mapping to core domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tuition_core::enrollment::EnrollmentStatus as DomainEnrollmentStatus;
use tuition_core::ledger::WalletTransactionKind as DomainWalletTransactionKind;

/// `enrollment_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "enrollment_status")]
pub enum EnrollmentStatus {
    /// Enrolled and studying.
    #[sea_orm(string_value = "active")]
    Active,
    /// Finished the course.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Left the course.
    #[sea_orm(string_value = "dropped")]
    Dropped,
}

/// `wallet_transaction_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "wallet_transaction_kind"
)]
pub enum WalletTransactionKind {
    /// Wallet top-up.
    #[sea_orm(string_value = "funding")]
    Funding,
    /// Enrollment fee charge.
    #[sea_orm(string_value = "enrollment_fee")]
    EnrollmentFee,
}

impl From<EnrollmentStatus> for DomainEnrollmentStatus {
    fn from(status: EnrollmentStatus) -> Self {
        match status {
            EnrollmentStatus::Active => Self::Active,
            EnrollmentStatus::Completed => Self::Completed,
            EnrollmentStatus::Dropped => Self::Dropped,
        }
    }
}

impl From<DomainEnrollmentStatus> for EnrollmentStatus {
    fn from(status: DomainEnrollmentStatus) -> Self {
        match status {
            DomainEnrollmentStatus::Active => Self::Active,
            DomainEnrollmentStatus::Completed => Self::Completed,
            DomainEnrollmentStatus::Dropped => Self::Dropped,
        }
    }
}

impl From<WalletTransactionKind> for DomainWalletTransactionKind {
    fn from(kind: WalletTransactionKind) -> Self {
        match kind {
            WalletTransactionKind::Funding => Self::Funding,
            WalletTransactionKind::EnrollmentFee => Self::EnrollmentFee,
        }
    }
}

impl From<DomainWalletTransactionKind> for WalletTransactionKind {
    fn from(kind: DomainWalletTransactionKind) -> Self {
        match kind {
            DomainWalletTransactionKind::Funding => Self::Funding,
            DomainWalletTransactionKind::EnrollmentFee => Self::EnrollmentFee,
        }
    }
}
