//! Authentication flows
//!
//! Registration, login, token refresh and identity resolution on top of
//! the password and token services and a user store.
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - Token keys are pre-computed once at startup

use crate::auth::{
    AuthError, Claims, PasswordError, PasswordService, TokenKind, TokenPair, TokenService,
};
use crate::repositories::{UserRecord, UserStore};
use pizza_tracker_shared::validation::{validate_email, validate_password};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service
///
/// Cheap to clone; everything inside is shared.
#[derive(Clone)]
pub struct AuthService {
    tokens: TokenService,
    passwords: PasswordService,
    users: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(
        tokens: TokenService,
        passwords: PasswordService,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            tokens,
            passwords,
            users,
        }
    }

    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    #[inline]
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Register a new user
    pub async fn register(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        validate_email(email).map_err(AuthError::InvalidInput)?;
        validate_password(password).map_err(AuthError::InvalidInput)?;

        if self.users.find_by_email(email).await?.is_some() {
            debug!("Registration rejected: email already registered");
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = self
            .passwords
            .hash_async(password.to_string())
            .await
            .map_err(|e| AuthError::Internal(e.into()))?;

        // A concurrent registration can still win the race; the store's
        // unique constraint turns that into DuplicateAccount as well.
        let user = self.users.create(email, &password_hash).await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = match self
            .passwords
            .verify_async(password.to_string(), user.password_hash.clone())
            .await
        {
            Ok(valid) => valid,
            Err(PasswordError::MalformedHash(reason)) => {
                warn!(user_id = user.id, %reason, "Stored password hash is malformed");
                false
            }
            Err(e) => return Err(AuthError::Internal(e.into())),
        };

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::AccountInactive);
        }

        info!(user_id = user.id, "User logged in");
        self.tokens.issue_pair(&user.email)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented refresh token is not invalidated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.verify_kind(refresh_token, TokenKind::Refresh)?;
        let user = self.lookup_subject(&claims).await?;

        debug!(user_id = user.id, "Token pair refreshed");
        self.tokens.issue_pair(&user.email)
    }

    /// Resolve the caller behind an access token
    ///
    /// Fail-fast chain: signature/expiry, token type, subject present,
    /// user exists, user active.
    pub async fn resolve_identity(&self, bearer_token: &str) -> Result<UserRecord, AuthError> {
        let claims = self.tokens.verify_kind(bearer_token, TokenKind::Access)?;
        self.lookup_subject(&claims).await
    }

    async fn lookup_subject(&self, claims: &Claims) -> Result<UserRecord, AuthError> {
        if claims.sub.is_empty() {
            debug!("Token rejected: no subject");
            return Err(AuthError::TokenInvalid);
        }

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !user.is_active {
            debug!(user_id = user.id, "Token rejected: inactive user");
            return Err(AuthError::AccountInactive);
        }

        Ok(user)
    }
}
