//! API error responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use threadsense_application::ModerateThreadError;
use tracing::{error, warn};

/// Error returned by a handler, rendered as `{"detail": "..."}`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ModerateThreadError> for ApiError {
    fn from(e: ModerateThreadError) -> Self {
        if e.is_input_error() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(detail) => warn!("Rejected request: {}", detail),
            ApiError::Internal(detail) => error!("Request failed: {}", detail),
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
