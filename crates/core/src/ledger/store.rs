//! Persistence ports for wallet-affecting operations.
//!
//! These traits are implemented by the db crate. A `LedgerUnitOfWork` is one
//! database transaction: nothing it stages is visible until `commit`, and
//! dropping or rolling it back discards every staged change.

use std::future::Future;

use rust_decimal::Decimal;
use thiserror::Error;
use tuition_shared::types::{CourseId, UserId};

use super::types::{NewWalletTransaction, WalletAccount, WalletTransaction};
use crate::enrollment::types::{Enrollment, NewEnrollment};

/// Failure reported by a store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other persistence or connectivity failure.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Opens units of work.
pub trait LedgerStore: Send + Sync {
    /// Unit of work type produced by this store.
    type Unit: LedgerUnitOfWork;

    /// Begins a new unit of work.
    fn begin(&self) -> impl Future<Output = Result<Self::Unit, StoreError>> + Send;
}

/// Operations available inside one atomic unit of work.
pub trait LedgerUnitOfWork: Send {
    /// Reads the stored flat enrollment fee, `None` if it was never set.
    ///
    /// Runs on the unit's own connection so a unit never needs a second one.
    fn enrollment_fee(
        &mut self,
    ) -> impl Future<Output = Result<Option<Decimal>, StoreError>> + Send;

    /// Loads the user's wallet and holds an exclusive lock on it until the
    /// unit of work ends. Returns `None` for unknown users.
    fn lock_wallet(
        &mut self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<WalletAccount>, StoreError>> + Send;

    /// Checks that a course exists.
    fn course_exists(
        &mut self,
        course_id: CourseId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Finds the enrollment for a (user, course) pair.
    fn find_enrollment(
        &mut self,
        user_id: UserId,
        course_id: CourseId,
    ) -> impl Future<Output = Result<Option<Enrollment>, StoreError>> + Send;

    /// Stages a new wallet balance.
    fn update_balance(
        &mut self,
        user_id: UserId,
        balance: Decimal,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Stages a new enrollment row.
    ///
    /// Must report a duplicate (user, course) pair as
    /// `StoreError::UniqueViolation`.
    fn insert_enrollment(
        &mut self,
        enrollment: NewEnrollment,
    ) -> impl Future<Output = Result<Enrollment, StoreError>> + Send;

    /// Stages a wallet statement line.
    fn record_transaction(
        &mut self,
        transaction: NewWalletTransaction,
    ) -> impl Future<Output = Result<WalletTransaction, StoreError>> + Send;

    /// Commits every staged change.
    fn commit(self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Discards every staged change.
    fn rollback(self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
