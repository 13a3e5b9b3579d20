//! Authentication routes
//!
//! Provides endpoints for user registration, login, and token refresh.
//!
//! # Performance Optimizations
//!
//! - Uses pre-computed JWT keys from AppState (no per-request allocation)
//! - Password hashing runs on blocking thread pool (doesn't block async runtime)

use crate::auth::{CurrentUser, TokenKind, TokenPair};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pizza_tracker_shared::{AuthTokens, LoginRequest, RefreshRequest, RegisterRequest, UserRead};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/me", get(get_me))
}

fn to_response(state: &AppState, pair: TokenPair) -> AuthTokens {
    AuthTokens {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "bearer".to_string(),
        expires_in: state.auth().tokens().ttl(TokenKind::Access).num_seconds(),
    }
}

/// Register a new user
///
/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserRead>)> {
    let user = state.auth().register(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user.to_read())))
}

/// Login with email and password
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let pair = state.auth().login(&req.email, &req.password).await?;
    Ok(Json(to_response(&state, pair)))
}

/// Exchange a refresh token for a new pair
///
/// POST /auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let pair = state.auth().refresh(&req.refresh_token).await?;
    Ok(Json(to_response(&state, pair)))
}

/// Get the authenticated user
///
/// GET /auth/me
async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserRead> {
    Json(user.to_read())
}
