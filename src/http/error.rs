//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::laytime::LaytimeError;
use crate::ports::PortsError;
use crate::retrieval::RetrievalError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<LaytimeError> for AppError {
    fn from(err: LaytimeError) -> Self {
        // The engine's only error kind is a malformed timestamp: caller error.
        AppError::BadRequest(err.to_string())
    }
}

impl From<PortsError> for AppError {
    fn from(err: PortsError) -> Self {
        match err {
            PortsError::UnknownPort(_) => AppError::NotFound(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
