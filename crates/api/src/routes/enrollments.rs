//! Enrollment listing for the current user.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use serde_json::json;
use tracing::error;
use tuition_db::EnrollmentRepository;
use tuition_shared::AppError;

use crate::error::error_response;
use crate::{AppState, middleware::AuthUser};

/// Creates the enrollment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/enrollments", get(list_enrollments))
}

/// GET `/enrollments` - The caller's enrollments, newest first.
async fn list_enrollments(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = EnrollmentRepository::new((*state.db).clone());

    match repo.list_for_user(auth.user_id()).await {
        Ok(enrollments) => (StatusCode::OK, Json(json!({ "enrollments": enrollments }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list enrollments");
            error_response(&AppError::Infrastructure(e.to_string()))
        }
    }
}
