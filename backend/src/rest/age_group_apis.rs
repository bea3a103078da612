//! # REST API for Age Group Management

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
use shared::{CreateAgeGroupRequest, UpdateAgeGroupRequest};

/// Create a router for age group related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_age_groups).post(create_age_group))
        .route("/:id", put(update_age_group))
}

/// List the caller's age groups with current stock
pub async fn list_age_groups(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/age-groups");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.age_group_service.list_age_groups(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list age groups: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing age groups").into_response()
        }
    }
}

/// Create a new age group (and its zeroed stock entry)
pub async fn create_age_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateAgeGroupRequest>,
) -> impl IntoResponse {
    info!("POST /api/age-groups - request: {:?}", request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.age_group_service.create_age_group(&user_id, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create age group: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Update an existing age group
pub async fn update_age_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<UpdateAgeGroupRequest>,
) -> impl IntoResponse {
    info!("PUT /api/age-groups/{} - request: {:?}", id, request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state
        .age_group_service
        .update_age_group(&user_id, &id, request)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update age group {}: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}
