//! In-memory ledger store for unit tests.
//!
//! `begin` takes an owned lock on the whole state, which models the row lock
//! the Postgres store takes on the wallet. Writes go to a staged copy that
//! replaces the shared state only on commit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tuition_shared::types::{CourseId, EnrollmentId, UserId, WalletTransactionId};

use crate::enrollment::{Enrollment, EnrollmentEvent, EnrollmentEventSink, NewEnrollment};
use crate::ledger::{
    LedgerStore, LedgerUnitOfWork, NewWalletTransaction, StoreError, WalletAccount,
    WalletTransaction,
};

/// Where to inject a backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Begin,
    ReadFee,
    UpdateBalance,
    InsertEnrollment,
    RecordTransaction,
    Commit,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub fee: Option<Decimal>,
    pub wallets: HashMap<UserId, Decimal>,
    pub courses: Vec<CourseId>,
    pub enrollments: Vec<Enrollment>,
    pub transactions: Vec<WalletTransaction>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    state: Arc<Mutex<MemoryState>>,
    fail_on: Arc<StdMutex<Option<FailPoint>>>,
    hide_enrollments: Arc<StdMutex<bool>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, balance: Decimal) -> UserId {
        let id = UserId::new();
        self.state.lock().await.wallets.insert(id, balance);
        id
    }

    pub async fn add_course(&self) -> CourseId {
        let id = CourseId::new();
        self.state.lock().await.courses.push(id);
        id
    }

    pub async fn set_fee(&self, fee: Option<Decimal>) {
        self.state.lock().await.fee = fee;
    }

    pub async fn balance(&self, user_id: UserId) -> Option<Decimal> {
        self.state.lock().await.wallets.get(&user_id).copied()
    }

    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }

    pub fn fail_on(&self, point: FailPoint) {
        if let Ok(mut slot) = self.fail_on.lock() {
            *slot = Some(point);
        }
    }

    /// Makes `find_enrollment` blind so duplicates reach the unique check.
    pub fn hide_existing_enrollments(&self) {
        if let Ok(mut flag) = self.hide_enrollments.lock() {
            *flag = true;
        }
    }

    fn injected(&self) -> Option<FailPoint> {
        self.fail_on.lock().ok().and_then(|slot| *slot)
    }
}

pub struct MemoryUnit {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
    fail_on: Option<FailPoint>,
    hide_enrollments: bool,
}

impl MemoryUnit {
    fn check(&self, point: FailPoint) -> Result<(), StoreError> {
        if self.fail_on == Some(point) {
            return Err(StoreError::Backend(format!("injected failure at {point:?}")));
        }
        Ok(())
    }
}

impl LedgerStore for MemoryLedger {
    type Unit = MemoryUnit;

    async fn begin(&self) -> Result<MemoryUnit, StoreError> {
        let fail_on = self.injected();
        if fail_on == Some(FailPoint::Begin) {
            return Err(StoreError::Backend("injected failure at Begin".to_string()));
        }
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        let hide_enrollments = self.hide_enrollments.lock().map(|f| *f).unwrap_or(false);
        Ok(MemoryUnit {
            guard,
            staged,
            fail_on,
            hide_enrollments,
        })
    }
}

impl LedgerUnitOfWork for MemoryUnit {
    async fn enrollment_fee(&mut self) -> Result<Option<Decimal>, StoreError> {
        self.check(FailPoint::ReadFee)?;
        Ok(self.staged.fee)
    }

    async fn lock_wallet(&mut self, user_id: UserId) -> Result<Option<WalletAccount>, StoreError> {
        Ok(self
            .staged
            .wallets
            .get(&user_id)
            .map(|balance| WalletAccount {
                user_id,
                balance: *balance,
            }))
    }

    async fn course_exists(&mut self, course_id: CourseId) -> Result<bool, StoreError> {
        Ok(self.staged.courses.contains(&course_id))
    }

    async fn find_enrollment(
        &mut self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, StoreError> {
        if self.hide_enrollments {
            return Ok(None);
        }
        Ok(self
            .staged
            .enrollments
            .iter()
            .find(|e| e.user_id == user_id && e.course_id == course_id)
            .cloned())
    }

    async fn update_balance(&mut self, user_id: UserId, balance: Decimal) -> Result<(), StoreError> {
        self.check(FailPoint::UpdateBalance)?;
        if balance.is_sign_negative() && !balance.is_zero() {
            return Err(StoreError::Backend("wallet balance check violated".to_string()));
        }
        self.staged.wallets.insert(user_id, balance);
        Ok(())
    }

    async fn insert_enrollment(&mut self, new: NewEnrollment) -> Result<Enrollment, StoreError> {
        self.check(FailPoint::InsertEnrollment)?;
        if self
            .staged
            .enrollments
            .iter()
            .any(|e| e.user_id == new.user_id && e.course_id == new.course_id)
        {
            return Err(StoreError::UniqueViolation(
                "enrollments_user_course_key".to_string(),
            ));
        }
        let enrollment = Enrollment {
            id: EnrollmentId::new(),
            user_id: new.user_id,
            course_id: new.course_id,
            status: new.status,
            progress: new.progress,
            enrolled_at: new.enrolled_at,
        };
        self.staged.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn record_transaction(
        &mut self,
        new: NewWalletTransaction,
    ) -> Result<WalletTransaction, StoreError> {
        self.check(FailPoint::RecordTransaction)?;
        let tx = WalletTransaction {
            id: WalletTransactionId::new(),
            user_id: new.user_id,
            kind: new.kind,
            amount: new.amount,
            balance_after: new.balance_after,
            enrollment_id: new.enrollment_id,
            description: new.description,
            created_at: Utc::now(),
        };
        self.staged.transactions.push(tx.clone());
        Ok(tx)
    }

    async fn commit(mut self) -> Result<(), StoreError> {
        self.check(FailPoint::Commit)?;
        *self.guard = self.staged;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Event sink that records every event it sees.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<StdMutex<Vec<EnrollmentEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<EnrollmentEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl EnrollmentEventSink for RecordingSink {
    fn enrolled(&self, event: &EnrollmentEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
