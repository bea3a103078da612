//! # REST API for the Inventory Dashboard

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use log::{error, info};

use crate::rest::require_user;
use crate::AppState;

/// Create a router for dashboard APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

/// Inventory summary: totals, shopping list, low-stock alerts, usage window
pub async fn get_dashboard(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/dashboard");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let today = Utc::now().date_naive();
    match state.inventory_service.dashboard(&user_id, today).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build dashboard: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building dashboard").into_response()
        }
    }
}
