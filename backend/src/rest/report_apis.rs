//! # REST API for Reports

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use crate::rest::require_user;
use crate::AppState;

/// Create a router for report APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_report))
}

/// Full reporting payload: monthly buckets, per-group stats, value series
pub async fn get_report(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/reports");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.reporting_service.report(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build report: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building report").into_response()
        }
    }
}
