//! Enrollment domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tuition_shared::types::{CourseId, EnrollmentId, UserId};

/// Lifecycle status of an enrollment.
///
/// The guard only ever creates `Active` enrollments. Progress tracking moves
/// them to `Completed` or `Dropped` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Enrolled and studying.
    Active,
    /// Finished the course.
    Completed,
    /// Left the course.
    Dropped,
}

impl EnrollmentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrollment ID.
    pub id: EnrollmentId,
    /// Enrolled user.
    pub user_id: UserId,
    /// Course enrolled in.
    pub course_id: CourseId,
    /// Lifecycle status.
    pub status: EnrollmentStatus,
    /// Completion percentage, 0 to 100.
    pub progress: i16,
    /// When the enrollment was created.
    pub enrolled_at: DateTime<Utc>,
}

/// Row to insert for a fresh enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    /// Enrolled user.
    pub user_id: UserId,
    /// Course enrolled in.
    pub course_id: CourseId,
    /// Initial status.
    pub status: EnrollmentStatus,
    /// Initial progress.
    pub progress: i16,
    /// Creation time.
    pub enrolled_at: DateTime<Utc>,
}

impl NewEnrollment {
    /// An active enrollment with zero progress.
    #[must_use]
    pub const fn active(user_id: UserId, course_id: CourseId, enrolled_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            course_id,
            status: EnrollmentStatus::Active,
            progress: 0,
            enrolled_at,
        }
    }
}
