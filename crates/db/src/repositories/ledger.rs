//! Postgres implementation of the ledger unit-of-work ports.
//!
//! One `SeaOrmUnitOfWork` is one database transaction. The wallet row is
//! taken with `SELECT ... FOR UPDATE`, so concurrent units touching the same
//! wallet run one after another. The `uq_enrollments_user_course` constraint
//! backs up the duplicate check and surfaces as `StoreError::UniqueViolation`.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
    SqlErr, TransactionTrait,
};
use tracing::debug;
use tuition_core::enrollment::{Enrollment, NewEnrollment};
use tuition_core::ledger::{
    LedgerStore, LedgerUnitOfWork, NewWalletTransaction, StoreError, WalletAccount,
    WalletTransaction,
};
use tuition_shared::types::{CourseId, EnrollmentId, UserId, WalletTransactionId};

use crate::entities::settings::{self, SINGLETON_ID};
use crate::entities::{courses, enrollments, users, wallet_transactions};

/// Maps a database error onto the store error the core understands.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::UniqueViolation(detail),
        _ => StoreError::Backend(err.to_string()),
    }
}

/// Opens ledger units of work on a connection pool.
#[derive(Debug, Clone)]
pub struct SeaOrmLedgerStore {
    db: DatabaseConnection,
}

impl SeaOrmLedgerStore {
    /// Creates a new ledger store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl LedgerStore for SeaOrmLedgerStore {
    type Unit = SeaOrmUnitOfWork;

    async fn begin(&self) -> Result<SeaOrmUnitOfWork, StoreError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        Ok(SeaOrmUnitOfWork { txn })
    }
}

/// A ledger unit of work backed by one database transaction.
///
/// Dropping it without `commit` rolls the transaction back.
#[derive(Debug)]
pub struct SeaOrmUnitOfWork {
    txn: DatabaseTransaction,
}

impl LedgerUnitOfWork for SeaOrmUnitOfWork {
    async fn enrollment_fee(&mut self) -> Result<Option<Decimal>, StoreError> {
        let row = settings::Entity::find_by_id(SINGLETON_ID)
            .one(&self.txn)
            .await
            .map_err(store_error)?;
        Ok(row.and_then(|s| s.enrollment_fee))
    }

    async fn lock_wallet(&mut self, user_id: UserId) -> Result<Option<WalletAccount>, StoreError> {
        let user = users::Entity::find_by_id(user_id.into_inner())
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(store_error)?;

        if user.is_some() {
            debug!(%user_id, "Wallet row locked");
        }

        Ok(user.map(|u| WalletAccount {
            user_id,
            balance: u.wallet_balance,
        }))
    }

    async fn course_exists(&mut self, course_id: CourseId) -> Result<bool, StoreError> {
        let count = courses::Entity::find_by_id(course_id.into_inner())
            .count(&self.txn)
            .await
            .map_err(store_error)?;
        Ok(count > 0)
    }

    async fn find_enrollment(
        &mut self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, StoreError> {
        let found = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id.into_inner()))
            .filter(enrollments::Column::CourseId.eq(course_id.into_inner()))
            .one(&self.txn)
            .await
            .map_err(store_error)?;
        Ok(found.map(Enrollment::from))
    }

    async fn update_balance(&mut self, user_id: UserId, balance: Decimal) -> Result<(), StoreError> {
        users::ActiveModel {
            id: Unchanged(user_id.into_inner()),
            wallet_balance: Set(balance),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.txn)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn insert_enrollment(&mut self, new: NewEnrollment) -> Result<Enrollment, StoreError> {
        let enrolled_at = new.enrolled_at.into();
        let model = enrollments::ActiveModel {
            id: Set(EnrollmentId::new().into_inner()),
            user_id: Set(new.user_id.into_inner()),
            course_id: Set(new.course_id.into_inner()),
            status: Set(new.status.into()),
            progress: Set(new.progress),
            enrolled_at: Set(enrolled_at),
            updated_at: Set(enrolled_at),
        }
        .insert(&self.txn)
        .await
        .map_err(store_error)?;
        Ok(model.into())
    }

    async fn record_transaction(
        &mut self,
        new: NewWalletTransaction,
    ) -> Result<WalletTransaction, StoreError> {
        let model = wallet_transactions::ActiveModel {
            id: Set(WalletTransactionId::new().into_inner()),
            user_id: Set(new.user_id.into_inner()),
            kind: Set(new.kind.into()),
            amount: Set(new.amount),
            balance_after: Set(new.balance_after),
            enrollment_id: Set(new.enrollment_id.map(EnrollmentId::into_inner)),
            description: Set(new.description),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.txn)
        .await
        .map_err(store_error)?;
        Ok(model.into())
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().await.map_err(store_error)
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.txn.rollback().await.map_err(store_error)
    }
}
