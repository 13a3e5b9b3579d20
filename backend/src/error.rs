//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use crate::auth::AuthError;
use crate::repositories::StoreError;
use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pizza_tracker_shared::{ErrorDetail, ErrorResponse};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// No usable bearer credential on the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => {
                ApiError::Internal(anyhow::anyhow!("Unexpected duplicate record"))
            }
            StoreError::Backend(e) => ApiError::Internal(e),
        }
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            ApiError::Auth(err) => {
                let status = match err {
                    AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    AuthError::DuplicateAccount => StatusCode::CONFLICT,
                    AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    AuthError::InvalidCredentials
                    | AuthError::TokenInvalid
                    | AuthError::TokenWrongType
                    | AuthError::AccountInactive
                    | AuthError::AccountNotFound => StatusCode::UNAUTHORIZED,
                };
                if let AuthError::Internal(inner) = err {
                    error!("Internal auth error: {:?}", inner);
                    return (status, err.code(), "An internal error occurred".to_string());
                }
                (status, err.code(), err.to_string())
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        });

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
