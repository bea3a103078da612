//! # REST API for Page Settings

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
use shared::UpdatePageSettingsRequest;

/// Create a router for page settings APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_page_settings).put(update_page_settings))
}

/// Get the caller's public-page texts (defaults filled in)
pub async fn get_page_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("GET /api/page-settings");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.page_settings_service.get_settings(&user_id).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => {
            error!("Failed to get page settings: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving page settings").into_response()
        }
    }
}

/// Update the caller's public-page texts
pub async fn update_page_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdatePageSettingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/page-settings - request: {:?}", request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state
        .page_settings_service
        .update_settings(&user_id, request)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update page settings: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}
