//! # REST API for Stock Reminders

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};
use serde_json::json;

use crate::rest::{error_status, require_user};
use crate::AppState;
use shared::CreateReminderRequest;

/// Create a router for reminder APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reminders).post(create_reminder))
        .route("/:id/read", post(mark_reminder_read))
        .route("/check", post(check_stock_reminders))
}

/// List the caller's reminders with the unread count
pub async fn list_reminders(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/reminders");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.reminder_service.list_reminders(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list reminders: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing reminders").into_response()
        }
    }
}

/// Create a manual reminder
pub async fn create_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateReminderRequest>,
) -> impl IntoResponse {
    info!("POST /api/reminders - request: {:?}", request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.reminder_service.create_reminder(&user_id, request).await {
        Ok(reminder) => (StatusCode::CREATED, Json(reminder)).into_response(),
        Err(e) => {
            error!("Failed to create reminder: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Mark a reminder as read
pub async fn mark_reminder_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/reminders/{}/read", id);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.reminder_service.mark_read(&user_id, &id).await {
        Ok(reminder) => (StatusCode::OK, Json(reminder)).into_response(),
        Err(e) => {
            error!("Failed to mark reminder {} read: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Run the low-stock sweep for the caller's groups
pub async fn check_stock_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("POST /api/reminders/check");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.reminder_service.check_stock_reminders(&user_id).await {
        Ok(created) => (StatusCode::OK, Json(json!({ "created": created }))).into_response(),
        Err(e) => {
            error!("Failed to run reminder sweep: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error checking reminders").into_response()
        }
    }
}
