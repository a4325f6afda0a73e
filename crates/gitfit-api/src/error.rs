//! Maps domain errors to HTTP responses.
//!
//! Fixed mapping: every credential/token failure is 401 with a
//! category-level code, storage unavailability is 503 (never disguised
//! as a bad credential), malformed request shapes are 400, and anything
//! unexpected is a generic 500 logged server-side.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gitfit_auth::error::{AuthError, CredentialError, TokenError};
use gitfit_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error type returned by handlers and extractors.
#[derive(Debug)]
pub enum ApiError {
    /// Authentication pipeline failure.
    Auth(AuthError),
    /// Ambient application failure.
    App(AppError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::Auth(err) => match err {
                AuthError::Credential(credential) => match credential {
                    CredentialError::Missing => {
                        (StatusCode::UNAUTHORIZED, "MISSING_KEY", err.to_string())
                    }
                    CredentialError::Malformed | CredentialError::Invalid => {
                        (StatusCode::UNAUTHORIZED, "INVALID_KEY", err.to_string())
                    }
                },
                AuthError::Token(token) => match token {
                    TokenError::Missing => {
                        (StatusCode::UNAUTHORIZED, "MISSING_TOKEN", err.to_string())
                    }
                    TokenError::Malformed | TokenError::SignatureInvalid => {
                        (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", err.to_string())
                    }
                    TokenError::Expired => {
                        (StatusCode::UNAUTHORIZED, "EXPIRED_TOKEN", err.to_string())
                    }
                },
                AuthError::StorageUnavailable(cause) => {
                    tracing::error!(error = %cause, "account storage unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORAGE_UNAVAILABLE",
                        "account storage is temporarily unavailable".to_string(),
                    )
                }
                AuthError::Internal(cause) => {
                    tracing::error!(error = %cause, "internal authentication fault");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "an unexpected error occurred".to_string(),
                    )
                }
            },
            Self::App(err) => match err.kind {
                ErrorKind::Validation => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    err.message.clone(),
                ),
                ErrorKind::NotFound => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.message.clone())
                }
                ErrorKind::Conflict => {
                    (StatusCode::CONFLICT, "CONFLICT", err.message.clone())
                }
                ErrorKind::ServiceUnavailable => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    err.message.clone(),
                ),
                ErrorKind::Internal
                | ErrorKind::Database
                | ErrorKind::Configuration
                | ErrorKind::Serialization => {
                    tracing::error!(error = %err, "internal server error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "an unexpected error occurred".to_string(),
                    )
                }
            },
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
