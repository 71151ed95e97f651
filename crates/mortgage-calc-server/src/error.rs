//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mortgage_calc_core::CalcError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more loan constraints violated.
    #[error("Invalid input")]
    Validation(Vec<String>),

    /// Body could not be read as a JSON loan request.
    #[error("Invalid JSON body")]
    BadRequest(String),

    /// Anything else; the detail is logged, never returned.
    #[error("Server error")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let label = self.to_string();
        let (status, details) = match self {
            ApiError::Validation(details) => (StatusCode::BAD_REQUEST, Some(details)),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, Some(vec![reason])),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "calculation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let body = Json(ErrorResponse {
            error: label,
            details,
        });

        (status, body).into_response()
    }
}

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        if err.is_client_error() {
            ApiError::Validation(err.details().to_vec())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
