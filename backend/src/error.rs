//! Error handling for the Flameworker inventory backend
//!
//! Fatal import errors (bad version, malformed payload, failed erase) travel
//! through `AppError`; per-item import problems are recorded as data instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ledger::LedgerError;
use crate::services::snapshot::DecodeError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Import errors
    #[error("Unsupported snapshot version: {found}")]
    UnsupportedVersion { found: String },

    #[error("Malformed snapshot: {0}")]
    MalformedPayload(#[from] DecodeError),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Collaborator errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::UnsupportedVersion { found } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "UNSUPPORTED_VERSION".to_string(),
                    message: format!("Snapshot version {} is not supported", found),
                    field: Some("version".to_string()),
                },
            ),
            AppError::MalformedPayload(err) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "MALFORMED_PAYLOAD".to_string(),
                    message: err.to_string(),
                    field: None,
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::Ledger(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "LEDGER_ERROR".to_string(),
                    message: "The inventory ledger could not complete the request".to_string(),
                    field: None,
                },
            ),
            AppError::Catalog(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "CATALOG_ERROR".to_string(),
                    message: format!("Catalog error: {}", msg),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for services and handlers
pub type AppResult<T> = Result<T, AppError>;
