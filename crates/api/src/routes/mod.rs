//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod courses;
pub mod enrollments;
pub mod health;
pub mod settings;
pub mod wallet;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Everything except health requires a bearer token
    let protected_routes = Router::new()
        .merge(courses::routes())
        .merge(enrollments::routes())
        .merge(wallet::routes())
        .merge(settings::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(health::routes()).merge(protected_routes)
}
