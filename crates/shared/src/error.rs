//! Application-wide error types.
//!
//! Domain errors from `tuition-core` convert into `AppError` so the HTTP layer
//! renders every failure through one code/status table.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate or conflicting state (e.g., already enrolled).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Wallet balance does not cover the requested charge.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Persistence or connectivity failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::InsufficientFunds(_) => 422,
            Self::Infrastructure(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            Self::Infrastructure(_) => "INFRASTRUCTURE_ERROR",
        }
    }

    /// Returns true if the user can fix the failure themselves.
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        !matches!(self, Self::Infrastructure(_))
    }

    /// Message safe to show to end users.
    ///
    /// Infrastructure details stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Infrastructure(_) => "An error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Unauthorized(String::new()).status_code(), 401);
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::InsufficientFunds(String::new()).status_code(), 422);
        assert_eq!(AppError::Infrastructure(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::InsufficientFunds(String::new()).error_code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(
            AppError::Infrastructure(String::new()).error_code(),
            "INFRASTRUCTURE_ERROR"
        );
    }
}
