//! Order resource handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::info;

use super::parse_user_id;
use crate::{
    envelope::Envelope,
    error::{ApiError, ApiResult},
    models::{OrdersResponse, TotalPriceResponse, total_price},
    state::AppState,
    validation::{parse_body, validate_order_payload},
};

/// Append an order to a user's orders
pub async fn add_order(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let order = validate_order_payload(&parse_body(&body)?)?;
    let user_id = parse_user_id(&user_id)?;
    info!("Adding order for user {}", user_id);

    if !state.user_store.push_order(user_id, order).await? {
        return Err(ApiError::UserNotFound);
    }

    Ok(Json(Envelope::empty("Order created successfully!")))
}

/// List a user's orders
pub async fn list_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user_id = parse_user_id(&user_id)?;
    info!("Fetching orders for user {}", user_id);

    let orders = state
        .user_store
        .orders(user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(Envelope::success(
        "Orders fetched successfully!",
        OrdersResponse { orders },
    )))
}

/// Sum `price × quantity` over a user's orders
pub async fn calculate_total_price(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user_id = parse_user_id(&user_id)?;
    info!("Calculating total price for user {}", user_id);

    let orders = state
        .user_store
        .orders(user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(Envelope::success(
        "Total price calculated successfully!",
        TotalPriceResponse {
            total_price: total_price(&orders),
        },
    )))
}
