//! Users service routes

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;

use crate::{error::ApiError, state::AppState};

pub mod orders;
pub mod users;


/// Create the router for the users service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/users", post(users::create_user).get(users::list_users))
        .route(
            "/api/users/:userId",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/users/:userId/orders",
            put(orders::add_order).get(orders::list_orders),
        )
        .route(
            "/api/users/:userId/orders/total-price",
            get(orders::calculate_total_price),
        )
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "users-service"
    }))
}

/// Parse the `:userId` path segment
///
/// A segment that is not an integer cannot match any stored user.
pub(crate) fn parse_user_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::UserNotFound)
}
