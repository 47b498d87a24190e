//! Custom error types for the users service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::{envelope::Envelope, password::PasswordError, validation::ValidationError};

/// Custom error type for the users service
///
/// Every variant renders as the standard envelope. Storage and hashing
/// failures are logged and reported generically.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No user matches the requested `userId`
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),

    /// Password hashing error
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match &self {
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                Envelope::failure("Validation error", 400, e.description()),
            ),
            ApiError::UserNotFound => (
                StatusCode::NOT_FOUND,
                Envelope::failure("User not found", 404, "User not found!"),
            ),
            ApiError::Database(_) | ApiError::Password(_) => {
                error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::failure("Internal Server Error", 500, "Internal Server Error"),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
