//! Wallet ledger guard: the enrollment unit of work.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, warn};
use tuition_shared::types::{CourseId, UserId};

use super::error::EnrollError;
use super::events::{EnrollmentEvent, EnrollmentEventSink};
use super::types::{Enrollment, NewEnrollment};
use crate::ledger::{
    LedgerStore, LedgerUnitOfWork, NewWalletTransaction, StoreError, WalletTransactionKind,
};
use crate::settings::resolve_enrollment_fee;

/// Enrolls users in courses, paying the flat fee from their wallet.
///
/// The guard owns no state of its own. Consistency comes from the unit of
/// work: the wallet row is locked before anything is checked, and every write
/// is discarded unless all of them succeed.
#[derive(Debug, Clone)]
pub struct LedgerGuard<S, E> {
    store: S,
    events: E,
}

/// What a successful unit of work produced, before commit.
struct Staged {
    enrollment: Enrollment,
    fee: Decimal,
    balance_after: Decimal,
}

impl<S, E> LedgerGuard<S, E>
where
    S: LedgerStore,
    E: EnrollmentEventSink,
{
    /// Creates a new guard.
    #[must_use]
    pub const fn new(store: S, events: E) -> Self {
        Self { store, events }
    }

    /// Enrolls `user_id` in `course_id`, charging the enrollment fee.
    ///
    /// Steps, all inside one unit of work:
    /// 1. Read the enrollment fee (0 if unset)
    /// 2. Lock the wallet and check user and course exist
    /// 3. Reject duplicates with `AlreadyEnrolled`
    /// 4. Reject `balance < fee` with `InsufficientFunds`
    /// 5. Debit the wallet
    /// 6. Insert the active enrollment and its statement line
    ///
    /// The event sink is notified only after commit.
    ///
    /// # Errors
    ///
    /// Returns `EnrollError` if a business rule rejects the enrollment or the
    /// store fails. In both cases nothing was persisted.
    pub async fn enroll(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Enrollment, EnrollError> {
        let mut unit = self.store.begin().await.map_err(|e| {
            error!(%user_id, %course_id, error = %e, "Failed to begin enrollment unit of work");
            EnrollError::from(e)
        })?;

        let staged = match stage(&mut unit, user_id, course_id).await {
            Ok(staged) => staged,
            Err(err) => {
                if let Err(rollback_err) = unit.rollback().await {
                    warn!(%user_id, %course_id, error = %rollback_err, "Rollback failed");
                }
                log_failure(&err, user_id, course_id);
                return Err(err);
            }
        };

        if let Err(e) = unit.commit().await {
            let err = duplicate_or_infrastructure(e, user_id, course_id);
            log_failure(&err, user_id, course_id);
            return Err(err);
        }

        self.events.enrolled(&EnrollmentEvent {
            user_id,
            course_id,
            enrollment_id: staged.enrollment.id,
            fee: staged.fee,
            balance_after: staged.balance_after,
        });

        Ok(staged.enrollment)
    }
}

async fn stage<U: LedgerUnitOfWork>(
    unit: &mut U,
    user_id: UserId,
    course_id: CourseId,
) -> Result<Staged, EnrollError> {
    let stored_fee = unit.enrollment_fee().await?;
    let fee = resolve_enrollment_fee(stored_fee).map_err(|e| {
        EnrollError::Infrastructure(format!("invalid enrollment fee setting: {e}"))
    })?;

    let wallet = unit
        .lock_wallet(user_id)
        .await?
        .ok_or(EnrollError::UserNotFound(user_id))?;

    if !unit.course_exists(course_id).await? {
        return Err(EnrollError::CourseNotFound(course_id));
    }

    if unit.find_enrollment(user_id, course_id).await?.is_some() {
        return Err(EnrollError::AlreadyEnrolled { user_id, course_id });
    }

    if !wallet.covers(fee) {
        return Err(EnrollError::InsufficientFunds {
            balance: wallet.balance,
            fee,
        });
    }

    let balance_after = wallet.balance - fee;
    unit.update_balance(user_id, balance_after).await?;

    let enrollment = unit
        .insert_enrollment(NewEnrollment::active(user_id, course_id, Utc::now()))
        .await
        .map_err(|e| duplicate_or_infrastructure(e, user_id, course_id))?;

    if !fee.is_zero() {
        unit.record_transaction(NewWalletTransaction {
            user_id,
            kind: WalletTransactionKind::EnrollmentFee,
            amount: fee,
            balance_after,
            enrollment_id: Some(enrollment.id),
            description: format!("Enrollment fee for course {course_id}"),
        })
        .await?;
    }

    debug!(%user_id, %course_id, %fee, %balance_after, "Enrollment staged");

    Ok(Staged {
        enrollment,
        fee,
        balance_after,
    })
}

/// A unique violation on the enrollment insert means a concurrent call won.
fn duplicate_or_infrastructure(err: StoreError, user_id: UserId, course_id: CourseId) -> EnrollError {
    match err {
        StoreError::UniqueViolation(_) => EnrollError::AlreadyEnrolled { user_id, course_id },
        other => other.into(),
    }
}

fn log_failure(err: &EnrollError, user_id: UserId, course_id: CourseId) {
    if err.is_user_correctable() {
        debug!(%user_id, %course_id, code = err.error_code(), "Enrollment rejected");
    } else {
        error!(%user_id, %course_id, error = %err, "Enrollment aborted");
    }
}
