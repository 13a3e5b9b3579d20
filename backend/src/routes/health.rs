//! Health endpoints
//!
//! `/health` and `/health/live` answer as long as the process serves
//! requests. `/health/ready` also pings the user store and returns 503 when
//! it is unreachable.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub user_store: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}

/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let user_store = match state.auth().users().ping().await {
        Ok(()) => CheckStatus {
            status: "healthy",
            message: None,
        },
        Err(e) => CheckStatus {
            status: "unhealthy",
            message: Some(e.to_string()),
        },
    };

    let (code, status) = if user_store.is_healthy() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    let mut response = HealthResponse::new(status);
    response.checks = Some(HealthChecks { user_store });

    (code, Json(response))
}
