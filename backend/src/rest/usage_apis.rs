//! # REST API for Usage Records

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use crate::rest::{error_status, require_user};
use crate::AppState;
use shared::CreateUsageRequest;

/// Create a router for usage related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_usage).post(create_usage))
}

/// Record diaper usage (decrements stock)
pub async fn create_usage(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateUsageRequest>,
) -> impl IntoResponse {
    info!("POST /api/usage - request: {:?}", request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.usage_service.record_usage(&user_id, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to record usage: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// List the caller's usage records
pub async fn list_usage(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/usage");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.usage_service.list_usage(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list usage: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing usage").into_response()
        }
    }
}
