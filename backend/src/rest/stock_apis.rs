//! # REST API for Stock Management

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::{error, info};

use crate::rest::{error_status, require_user};
use crate::AppState;
use shared::UpdateStockRequest;

/// Create a router for stock related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stock))
        .route("/:id", put(set_stock))
}

/// List the caller's stock entries
pub async fn list_stock(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/stock");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.stock_service.list_stock(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list stock: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing stock").into_response()
        }
    }
}

/// Set a stock entry to an absolute quantity
pub async fn set_stock(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<UpdateStockRequest>,
) -> impl IntoResponse {
    info!("PUT /api/stock/{} - request: {:?}", id, request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.stock_service.set_stock(&user_id, &id, request).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => {
            error!("Failed to set stock {}: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}
