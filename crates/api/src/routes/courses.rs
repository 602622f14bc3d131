//! Course catalogue and enrollment routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{error, info};
use tuition_db::{CourseRepository, EnrollmentRepository, entities::courses};
use tuition_shared::AppError;
use tuition_shared::types::{CourseId, PageRequest, PageResponse};
use uuid::Uuid;

use crate::error::{enroll_error_response, error_response};
use crate::{AppState, middleware::AuthUser};

/// Creates the course routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/{course_id}/enroll", post(enroll))
        .route("/courses/{course_id}/enrollment", get(get_enrollment))
}

/// Course as listed in the catalogue.
#[derive(Debug, Serialize)]
pub struct CourseResponse {
    /// Course ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Listed tuition price.
    pub price: String,
}

impl From<courses::Model> for CourseResponse {
    fn from(model: courses::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price.to_string(),
        }
    }
}

/// GET `/courses` - List published courses.
async fn list_courses(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = CourseRepository::new((*state.db).clone());

    match repo.list_published(&page).await {
        Ok(page) => {
            let response = PageResponse::new(
                page.data.into_iter().map(CourseResponse::from).collect(),
                page.meta.page,
                page.meta.per_page,
                page.meta.total,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list courses");
            error_response(&AppError::Infrastructure(e.to_string()))
        }
    }
}

/// POST `/courses/{course_id}/enroll` - Enroll the caller, paying the
/// enrollment fee from their wallet.
async fn enroll(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> impl IntoResponse {
    let user_id = auth.user_id();
    let course_id = CourseId::from_uuid(course_id);

    match state.enrollment_guard.enroll(user_id, course_id).await {
        Ok(enrollment) => {
            info!(%user_id, %course_id, enrollment_id = %enrollment.id, "Enrollment created");
            (StatusCode::CREATED, Json(enrollment)).into_response()
        }
        Err(e) => enroll_error_response(&e),
    }
}

/// GET `/courses/{course_id}/enrollment` - The caller's enrollment in one course.
async fn get_enrollment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EnrollmentRepository::new((*state.db).clone());
    let course_id = CourseId::from_uuid(course_id);

    match repo.find(auth.user_id(), course_id).await {
        Ok(Some(enrollment)) => (StatusCode::OK, Json(enrollment)).into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!(
            "Not enrolled in course {course_id}"
        ))),
        Err(e) => {
            error!(error = %e, "Failed to load enrollment");
            error_response(&AppError::Infrastructure(e.to_string()))
        }
    }
}
