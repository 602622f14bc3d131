//! Observability hook fired after a successful enrollment.

use rust_decimal::Decimal;
use tracing::info;
use tuition_shared::types::{CourseId, EnrollmentId, UserId};

/// Emitted once per committed enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentEvent {
    /// Enrolled user.
    pub user_id: UserId,
    /// Course enrolled in.
    pub course_id: CourseId,
    /// The new enrollment.
    pub enrollment_id: EnrollmentId,
    /// Fee charged.
    pub fee: Decimal,
    /// Wallet balance after the charge.
    pub balance_after: Decimal,
}

/// Fire-and-forget consumer of enrollment events.
///
/// Implementations must not block and cannot fail the enrollment.
pub trait EnrollmentEventSink: Send + Sync {
    /// Called after the enrollment has been committed.
    fn enrolled(&self, event: &EnrollmentEvent);
}

/// Writes enrollment events to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EnrollmentEventSink for TracingEventSink {
    fn enrolled(&self, event: &EnrollmentEvent) {
        info!(
            user_id = %event.user_id,
            course_id = %event.course_id,
            enrollment_id = %event.enrollment_id,
            fee = %event.fee,
            balance_after = %event.balance_after,
            "User enrolled in course"
        );
    }
}
