//! Error to HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use tuition_core::enrollment::EnrollError;
use tuition_shared::AppError;

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Renders an `AppError` as `{ "error": CODE, "message": ... }`.
///
/// Infrastructure details are logged and replaced with a generic message.
pub fn error_response(err: &AppError) -> Response {
    if !err.is_user_correctable() {
        error!(error = %err, "Request failed");
    }
    (
        status(err.status_code()),
        Json(json!({
            "error": err.error_code(),
            "message": err.public_message(),
        })),
    )
        .into_response()
}

/// Renders an enrollment failure.
///
/// `InsufficientFunds` carries the numbers a client needs to offer a top-up.
pub fn enroll_error_response(err: &EnrollError) -> Response {
    let code = err.error_code();
    let app_error = AppError::from(err.clone());
    let message = app_error.public_message();

    if !err.is_user_correctable() {
        error!(error = %err, "Enrollment failed");
    }

    let body = match err {
        EnrollError::InsufficientFunds { balance, fee } => json!({
            "error": code,
            "message": message,
            "details": {
                "balance": balance.to_string(),
                "fee": fee.to_string(),
                "top_up_needed": err.top_up_needed().map(|d| d.to_string()),
            }
        }),
        _ => json!({ "error": code, "message": message }),
    };

    (status(err.http_status_code()), Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tuition_shared::types::{CourseId, UserId};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(EnrollError::AlreadyEnrolled { user_id: UserId::new(), course_id: CourseId::new() }, StatusCode::CONFLICT, "ALREADY_ENROLLED")]
    #[case(EnrollError::CourseNotFound(CourseId::new()), StatusCode::NOT_FOUND, "COURSE_NOT_FOUND")]
    #[case(EnrollError::UserNotFound(UserId::new()), StatusCode::NOT_FOUND, "USER_NOT_FOUND")]
    #[tokio::test]
    async fn test_enroll_error_status(
        #[case] err: EnrollError,
        #[case] expected: StatusCode,
        #[case] code: &str,
    ) {
        let response = enroll_error_response(&err);
        assert_eq!(response.status(), expected);
        assert_eq!(body_json(response).await["error"], code);
    }

    #[tokio::test]
    async fn test_insufficient_funds_suggests_top_up() {
        let err = EnrollError::InsufficientFunds {
            balance: dec!(4999),
            fee: dec!(5000),
        };

        let response = enroll_error_response(&err);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"], "INSUFFICIENT_FUNDS");
        assert!(body["message"].as_str().unwrap().contains("top up"));
        assert_eq!(body["details"]["top_up_needed"], "1");
    }

    #[tokio::test]
    async fn test_infrastructure_details_are_hidden() {
        let err = EnrollError::Infrastructure("connection refused on 10.0.0.5".to_string());

        let response = enroll_error_response(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "INFRASTRUCTURE_ERROR");
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_app_error_response() {
        let response = error_response(&AppError::Validation("amount must be positive".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");
    }
}
