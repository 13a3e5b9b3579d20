//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Public view of a user account (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Root endpoint greeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub message: String,
}

// ============================================================================
// Pizzeria Types
// ============================================================================

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Pizzeria creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzeriaCreate {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub google_maps_url: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub visited_at: Option<DateTime<Utc>>,
}

/// Pizzeria response
///
/// `location` is only present when both coordinates are known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzeriaRead {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub location: Option<Location>,
    pub rating: Option<f64>,
    pub google_maps_url: Option<String>,
    pub review: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Build a location from optional columns; both must be set.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}
