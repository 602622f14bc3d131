//! Enrollment error types.

use rust_decimal::Decimal;
use thiserror::Error;
use tuition_shared::AppError;
use tuition_shared::types::{CourseId, UserId};

use crate::ledger::StoreError;

/// Errors returned by `LedgerGuard::enroll`.
///
/// Every variant except `Infrastructure` is a business-rule failure that left
/// the wallet and enrollments untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrollError {
    /// The user is already enrolled in the course.
    #[error("User {user_id} is already enrolled in course {course_id}")]
    AlreadyEnrolled {
        /// The user.
        user_id: UserId,
        /// The course.
        course_id: CourseId,
    },

    /// The wallet balance is below the enrollment fee.
    #[error("Insufficient wallet balance: {balance} available, {fee} required")]
    InsufficientFunds {
        /// Balance at the time of the check.
        balance: Decimal,
        /// Fee that was required.
        fee: Decimal,
    },

    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Course not found.
    #[error("Course not found: {0}")]
    CourseNotFound(CourseId),

    /// Persistence failure; the whole unit of work was rolled back.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl EnrollError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyEnrolled { .. } => "ALREADY_ENROLLED",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::CourseNotFound(_) => "COURSE_NOT_FOUND",
            Self::Infrastructure(_) => "INFRASTRUCTURE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::AlreadyEnrolled { .. } => 409,
            Self::InsufficientFunds { .. } => 422,
            Self::UserNotFound(_) | Self::CourseNotFound(_) => 404,
            Self::Infrastructure(_) => 500,
        }
    }

    /// Returns true for failures the user can fix (top up, pick another course).
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        !matches!(self, Self::Infrastructure(_))
    }

    /// Amount the user must add to afford the fee, for `InsufficientFunds`.
    #[must_use]
    pub fn top_up_needed(&self) -> Option<Decimal> {
        match self {
            Self::InsufficientFunds { balance, fee } => Some(*fee - *balance),
            _ => None,
        }
    }
}

impl From<StoreError> for EnrollError {
    fn from(err: StoreError) -> Self {
        Self::Infrastructure(err.to_string())
    }
}

impl From<EnrollError> for AppError {
    fn from(err: EnrollError) -> Self {
        match err {
            EnrollError::AlreadyEnrolled { .. } => Self::Conflict(err.to_string()),
            EnrollError::InsufficientFunds { .. } => Self::InsufficientFunds(format!(
                "{err}. Please top up your wallet and try again"
            )),
            EnrollError::UserNotFound(_) | EnrollError::CourseNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            EnrollError::Infrastructure(msg) => Self::Infrastructure(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        let err = EnrollError::AlreadyEnrolled {
            user_id: UserId::new(),
            course_id: CourseId::new(),
        };
        assert_eq!(err.error_code(), "ALREADY_ENROLLED");
        assert_eq!(err.http_status_code(), 409);

        let err = EnrollError::InsufficientFunds {
            balance: dec!(4999),
            fee: dec!(5000),
        };
        assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");
        assert_eq!(err.http_status_code(), 422);
        assert_eq!(err.top_up_needed(), Some(dec!(1)));

        let err = EnrollError::Infrastructure("down".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(!err.is_user_correctable());
        assert_eq!(err.top_up_needed(), None);
    }

    #[test]
    fn test_store_error_is_infrastructure() {
        let err: EnrollError = StoreError::Backend("connection reset".to_string()).into();
        assert!(matches!(err, EnrollError::Infrastructure(ref m) if m.contains("connection reset")));
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = EnrollError::InsufficientFunds {
            balance: dec!(10),
            fee: dec!(20),
        }
        .into();
        assert_eq!(app.status_code(), 422);
        assert!(app.to_string().contains("top up"));

        let app: AppError = EnrollError::CourseNotFound(CourseId::new()).into();
        assert_eq!(app.status_code(), 404);

        let app: AppError = EnrollError::Infrastructure("db".to_string()).into();
        assert_eq!(app.error_code(), "INFRASTRUCTURE_ERROR");
    }
}
