//! Unified error handling with Sentry integration.
//!
//! Mirrors the storefront's `AppError`, with one admin-specific wrinkle: an
//! upstream 401 means the session token expired, and the SPA needs a 401
//! back so it can send the admin through login again.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::ApiError;

/// Application-level error type for the admin back-office.
#[derive(Debug, Error)]
pub enum AppError {
    /// Commerce API operation failed.
    #[error("Commerce API error: {0}")]
    Api(#[from] ApiError),

    /// Form/query validation failed before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Session layer failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error envelope, mirroring the upstream `{code, message}` convention.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side errors to Sentry; auth failures are routine.
        let is_auth_failure = matches!(&self, Self::Api(ApiError::Api { code: 401, .. }));
        if !is_auth_failure && matches!(self, Self::Api(_) | Self::Internal(_) | Self::Session(_))
        {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Api(err) => match err {
                ApiError::Api { code: 401, .. } => StatusCode::UNAUTHORIZED,
                // Upstream said the entity doesn't exist; relay that.
                ApiError::Api { code: 404, .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Api(ApiError::Api { code: 401, .. }) => "Authentication expired".to_string(),
            Self::Api(ApiError::Api { code: 404, .. }) | Self::NotFound(_) => {
                "Not found".to_string()
            }
            Self::Api(_) => "External service error".to_string(),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Validation(msg) | Self::BadRequest(msg) => msg.clone(),
        };

        (
            status,
            Json(ErrorBody {
                code: status.as_u16(),
                message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
