//! # REST API for the Admin Console
//!
//! All handlers pass the caller through to the domain layer, which enforces
//! the admin flag itself; a non-admin caller gets a 403 from the error
//! mapping.

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
use shared::{CreateUserRequest, UpdateAdminStatusRequest, UpdateUserRequest};

/// Create a router for admin user management APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
        .route("/users/:id/stats", get(user_stats))
        .route("/users/:id/admin-status", put(set_admin_status))
}

/// List all user accounts
pub async fn list_users(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/admin/users");

    let caller = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.admin_service.list_users(&caller).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list users: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Create a user account profile
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateUserRequest>,
) -> impl IntoResponse {
    info!("POST /api/admin/users - request: {:?}", request);

    let caller = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.admin_service.create_user(&caller, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create user: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Update a user's email or display name
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    info!("PUT /api/admin/users/{} - request: {:?}", id, request);

    let caller = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.admin_service.update_user(&caller, &id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Grant or revoke the admin flag
pub async fn set_admin_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<UpdateAdminStatusRequest>,
) -> impl IntoResponse {
    info!("PUT /api/admin/users/{}/admin-status - request: {:?}", id, request);

    let caller = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state
        .admin_service
        .set_admin_status(&caller, &id, request.is_admin)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to set admin status for {}: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Delete a user account profile
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/admin/users/{}", id);

    let caller = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.admin_service.delete_user(&caller, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Per-user activity statistics
pub async fn user_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/admin/users/{}/stats", id);

    let caller = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.admin_service.user_stats(&caller, &id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to get stats for user {}: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}
