use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mango_core::DomainError;
use thiserror::Error;

use crate::response::ApiResponse;

/// Message returned in place of any server-side failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {}", .0.join("; "))]
    BadRequest(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(vec![message.into()])
    }

    /// Update and delete report a missing record as 400 rather than 404.
    pub fn not_found_as_bad_request(self) -> Self {
        match self {
            ApiError::NotFound(msg) => ApiError::BadRequest(vec![msg]),
            other => other,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(messages) => ApiError::BadRequest(messages),
            DomainError::NotFound(id) => ApiError::NotFound(format!("Menu item with ID {} not found.", id)),
            DomainError::Io(_) | DomainError::Persistence(_) | DomainError::Internal(_) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, messages) = match self {
            ApiError::BadRequest(messages) => {
                tracing::warn!("Bad request: {}", messages.join("; "));
                (StatusCode::BAD_REQUEST, messages)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, vec![msg])
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!("Payload too large: {}", msg);
                (StatusCode::PAYLOAD_TOO_LARGE, vec![msg])
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, vec![INTERNAL_ERROR_MESSAGE.to_string()])
            }
        };

        ApiResponse::failure(status, messages).into_response()
    }
}
