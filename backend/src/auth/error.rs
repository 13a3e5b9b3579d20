//! Authentication outcomes
//!
//! Every rejection the auth core can produce is a variant here. None of them
//! are retried; the HTTP layer decides the status code (see
//! [`crate::error::ApiError`]).

use crate::repositories::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),

    /// Unknown email or wrong password; the message is identical for both.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    DuplicateAccount,

    /// Bad signature, malformed token, expired token or missing subject.
    #[error("Could not validate credentials")]
    TokenInvalid,

    /// Correctly signed, but the `type` claim does not fit where it was presented.
    #[error("Invalid token type")]
    TokenWrongType,

    #[error("Inactive user")]
    AccountInactive,

    #[error("User not found")]
    AccountNotFound,

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    /// Machine-readable code used in error responses
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(_) => "VALIDATION_ERROR",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::DuplicateAccount => "DUPLICATE_ACCOUNT",
            AuthError::TokenInvalid => "TOKEN_INVALID",
            AuthError::TokenWrongType => "TOKEN_WRONG_TYPE",
            AuthError::AccountInactive => "ACCOUNT_INACTIVE",
            AuthError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => AuthError::DuplicateAccount,
            StoreError::Backend(e) => AuthError::Internal(e),
        }
    }
}
