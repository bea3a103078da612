//! # REST API for Purchases

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::{error, info};

use crate::rest::{error_status, require_user};
use crate::AppState;
use shared::CreatePurchaseRequest;

/// Create a router for purchase related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_purchase))
}

/// Record a purchase (increments stock)
pub async fn create_purchase(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreatePurchaseRequest>,
) -> impl IntoResponse {
    info!("POST /api/purchases - request: {:?}", request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.purchase_service.record_purchase(&user_id, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to record purchase: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}
