//! API Response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Uniform wrapper for every response body.
///
/// Built fresh for each response; `status_code` always mirrors the HTTP status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub is_success: bool,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    pub error_messages: Vec<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(status: StatusCode, result: T) -> Self {
        Self {
            is_success: true,
            status_code: status.as_u16(),
            result: Some(result),
            error_messages: Vec::new(),
        }
    }

    pub fn ok(result: T) -> Self {
        Self::success(StatusCode::OK, result)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl ApiResponse<()> {
    pub fn failure(status: StatusCode, error_messages: Vec<String>) -> Self {
        Self {
            is_success: false,
            status_code: status.as_u16(),
            result: None,
            error_messages,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
