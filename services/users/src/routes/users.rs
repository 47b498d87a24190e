//! User resource handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use super::parse_user_id;
use crate::{
    envelope::Envelope,
    error::{ApiError, ApiResult},
    models::user::{UserChanges, UserDocument, UserSummary},
    password::hash_password,
    state::AppState,
    validation::{parse_body, validate_user_payload},
};

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let payload = validate_user_payload(&parse_body(&body)?)?;
    info!("Creating user {}", payload.user_id);

    let password_hash = hash_password(payload.password.clone()).await?;
    let user = UserDocument::new(payload, password_hash)?;
    let user = state.user_store.insert(user).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success("User created successfully!", user)),
    ))
}

/// Get all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("Fetching all users");

    let users: Vec<UserSummary> = state
        .user_store
        .list()
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(Json(Envelope::success("Users fetched successfully!", users)))
}

/// Get a user by `userId`
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user_id = parse_user_id(&user_id)?;
    info!("Fetching user {}", user_id);

    let user = state
        .user_store
        .find_by_user_id(user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(Envelope::success("User fetched successfully!", user)))
}

/// Replace a user's fields, re-hashing the password
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let payload = validate_user_payload(&parse_body(&body)?)?;
    let user_id = parse_user_id(&user_id)?;
    info!("Updating user {}", user_id);

    let password_hash = hash_password(payload.password.clone()).await?;
    let user = state
        .user_store
        .update(user_id, UserChanges::new(payload, password_hash))
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(Envelope::success("User updated successfully!", user)))
}

/// Delete a user by `userId`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user_id = parse_user_id(&user_id)?;
    info!("Deleting user {}", user_id);

    if !state.user_store.delete(user_id).await? {
        return Err(ApiError::UserNotFound);
    }

    Ok(Json(Envelope::empty("User deleted successfully!")))
}
