//! Response types for the exam compliance API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Missing or unknown credentials.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new("UNAUTHORIZED", message),
        }
    }

    /// A worker id path segment that is not a valid id.
    pub fn invalid_worker_id(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::with_details(
                "INVALID_WORKER_ID",
                "Worker id must be an unsigned integer",
                details,
            ),
        }
    }

    /// Valid credentials without administrator rights.
    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error: ApiError::with_details(
                "FORBIDDEN",
                "Administrator privileges required",
                "The authenticated user is not an administrator",
            ),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        if self.status == StatusCode::UNAUTHORIZED {
            return (
                self.status,
                [(header::WWW_AUTHENTICATE, "Token")],
                Json(self.error),
            )
                .into_response();
        }
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ServiceError> for ApiErrorResponse {
    fn from(error: ServiceError) -> Self {
        let message = error.to_string();
        let (status, code) = match error {
            ServiceError::EmployerNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYER_NOT_FOUND"),
            ServiceError::WorkerNotFound { .. } => (StatusCode::NOT_FOUND, "WORKER_NOT_FOUND"),
            ServiceError::ExamNotFound { .. } => (StatusCode::NOT_FOUND, "EXAM_NOT_FOUND"),
            ServiceError::EmployerInUse { .. } => (StatusCode::CONFLICT, "EMPLOYER_IN_USE"),
            ServiceError::DuplicateTaxId { .. } => (StatusCode::CONFLICT, "DUPLICATE_TAX_ID"),
            ServiceError::DuplicateArcNumber { .. } => {
                (StatusCode::CONFLICT, "DUPLICATE_ARC_NUMBER")
            }
            ServiceError::DuplicateExam { .. } => (StatusCode::CONFLICT, "DUPLICATE_EXAM"),
            ServiceError::HireDateImmutable { .. } => {
                (StatusCode::CONFLICT, "HIRE_DATE_IMMUTABLE")
            }
            ServiceError::StoreUnavailable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_UNAVAILABLE")
            }
            ServiceError::ConfigNotFound { .. } | ServiceError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            ServiceError::Server { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR"),
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}
