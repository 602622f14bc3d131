//! Wallet routes: balance, top-up and statement.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use tuition_db::WalletRepository;
use tuition_shared::AppError;
use tuition_shared::types::PageRequest;

use crate::error::error_response;
use crate::{AppState, middleware::AuthUser};

/// Creates the wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet", get(get_balance))
        .route("/wallet/fund", post(fund_wallet))
        .route("/wallet/statement", get(get_statement))
}

/// Request body for a top-up.
#[derive(Debug, Deserialize)]
pub struct FundWalletRequest {
    /// Amount to add, as a decimal string or number.
    pub amount: Decimal,
}

/// GET `/wallet` - Current balance.
async fn get_balance(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone());
    let user_id = auth.user_id();

    match repo.balance(user_id).await {
        Ok(Some(balance)) => (
            StatusCode::OK,
            Json(json!({ "user_id": user_id, "balance": balance.to_string() })),
        )
            .into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!("User not found: {user_id}"))),
        Err(e) => {
            error!(error = %e, "Failed to load wallet balance");
            error_response(&AppError::Infrastructure(e.to_string()))
        }
    }
}

/// POST `/wallet/fund` - Top up the caller's wallet.
async fn fund_wallet(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<FundWalletRequest>,
) -> impl IntoResponse {
    match state.wallet_funding.fund(auth.user_id(), payload.amount).await {
        Ok(line) => (StatusCode::CREATED, Json(line)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// GET `/wallet/statement` - Paginated statement, newest first.
async fn get_statement(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone());

    match repo.statement(auth.user_id(), &page).await {
        Ok(statement) => (StatusCode::OK, Json(statement)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load wallet statement");
            error_response(&AppError::Infrastructure(e.to_string()))
        }
    }
}
