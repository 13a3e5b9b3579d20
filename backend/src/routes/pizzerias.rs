//! Pizzeria routes
//!
//! Listing is public; adding a pizzeria requires an access token.

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use pizza_tracker_shared::{PizzeriaCreate, PizzeriaRead};

/// Create pizzeria routes
pub fn pizzeria_routes() -> Router<AppState> {
    Router::new().route("/", get(list_pizzerias).post(create_pizzeria))
}

/// GET /pizzerias - All pizzerias
async fn list_pizzerias(State(state): State<AppState>) -> ApiResult<Json<Vec<PizzeriaRead>>> {
    Ok(Json(state.pizzerias().list().await?))
}

/// POST /pizzerias - Add a pizzeria
async fn create_pizzeria(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<PizzeriaCreate>,
) -> ApiResult<(StatusCode, Json<PizzeriaRead>)> {
    let pizzeria = state.pizzerias().create(&user, req).await?;
    Ok((StatusCode::CREATED, Json(pizzeria)))
}
