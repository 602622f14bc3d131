//! Enrollment fee settings routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use tuition_db::SettingsRepository;
use tuition_shared::AppError;

use crate::error::error_response;
use crate::{AppState, middleware::AuthUser};

/// Creates the settings routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/settings/enrollment-fee",
        get(get_enrollment_fee).put(update_enrollment_fee),
    )
}

/// Request body for changing the fee.
#[derive(Debug, Deserialize)]
pub struct UpdateEnrollmentFeeRequest {
    /// New flat fee. Must not be negative.
    pub enrollment_fee: Decimal,
}

/// GET `/settings/enrollment-fee` - Fee enrollment currently charges.
async fn get_enrollment_fee(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = SettingsRepository::new((*state.db).clone());

    match repo.current_enrollment_fee().await {
        Ok(fee) => (
            StatusCode::OK,
            Json(json!({ "enrollment_fee": fee.to_string() })),
        )
            .into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// PUT `/settings/enrollment-fee` - Change the fee (admin only).
async fn update_enrollment_fee(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateEnrollmentFeeRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require_admin() {
        return response;
    }

    let repo = SettingsRepository::new((*state.db).clone());
    match repo.update_enrollment_fee(payload.enrollment_fee).await {
        Ok(fee) => {
            info!(admin_id = %auth.user_id(), enrollment_fee = %fee, "Enrollment fee changed");
            (
                StatusCode::OK,
                Json(json!({ "enrollment_fee": fee.to_string() })),
            )
                .into_response()
        }
        Err(e) => error_response(&AppError::from(e)),
    }
}
