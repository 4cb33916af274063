//! Application error type with consistent JSON API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", Some(msg.clone()))
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "invalid_credentials", None),
            ApiError::PaymentRequired(msg) => {
                (StatusCode::PAYMENT_REQUIRED, "payment_required", Some(msg.clone()))
            }
            ApiError::NotFound(what) => {
                (StatusCode::NOT_FOUND, "not_found", Some(format!("{what} not found")))
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            ApiError::Upstream(msg) => {
                tracing::error!(error = %msg, "upstream service error");
                (StatusCode::BAD_GATEWAY, "upstream_error", None)
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

/// Map a repository error to the taxonomy: a unique-constraint violation
/// becomes a conflict, anything else stays internal. Pre-insert existence
/// checks can race, so the losing insert must still surface as a conflict.
pub fn conflict_on_unique(err: anyhow::Error, message: &str) -> ApiError {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            ApiError::Conflict(message.to_string())
        }
        _ => ApiError::Internal(err),
    }
}
