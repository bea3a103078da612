//! # REST API for the Baby Profile
//!
//! The private routes manage the caller's own profile; the public route
//! serves the shareable page payload by slug with no authentication.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use crate::rest::{error_status, require_user};
use crate::AppState;
use shared::SaveBabyProfileRequest;

/// Create a router for profile APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(save_profile))
}

/// Router for the public profile page payload
pub fn public_router() -> Router<AppState> {
    Router::new().route("/:slug", get(get_public_profile))
}

/// Get the caller's baby profile
pub async fn get_profile(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/profile");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.profile_service.get_profile(&user_id).await {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "No profile configured").into_response(),
        Err(e) => {
            error!("Failed to get profile: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving profile").into_response()
        }
    }
}

/// Create or replace the caller's baby profile
pub async fn save_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SaveBabyProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profile - request: {:?}", request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.profile_service.save_profile(&user_id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to save profile: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Public profile page payload by slug
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/public/profiles/{}", slug);

    match state.profile_service.public_profile(&slug).await {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        Err(e) => {
            error!("Failed to load public profile {}: {}", slug, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving profile").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::initialize_backend_with_store;
    use crate::storage::MemoryStore;
    use axum::body::to_bytes;

    fn family_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "family".parse().unwrap());
        headers
    }

    fn save_request(name: &str, slug: Option<&str>) -> SaveBabyProfileRequest {
        SaveBabyProfileRequest {
            name: name.to_string(),
            birth_date: None,
            is_born: false,
            gender: None,
            birth_place: None,
            parent1_name: None,
            parent2_name: None,
            url_slug: slug.map(|s| s.to_string()),
        }
    }

    #[tokio::test]
    async fn test_get_profile_before_save_is_not_found() {
        let state = initialize_backend_with_store(MemoryStore::new(), AppConfig::default());
        let response = get_profile(State(state), family_headers()).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_save_then_fetch_public_page() {
        let state = initialize_backend_with_store(MemoryStore::new(), AppConfig::default());

        let saved = save_profile(
            State(state.clone()),
            family_headers(),
            Json(save_request("Maria", Some("maria"))),
        )
        .await
        .into_response();
        assert_eq!(saved.status(), StatusCode::OK);

        let response = get_public_profile(State(state), Path("maria".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["name"], "Maria");
        assert_eq!(json["title"], "Lap Lap Diaper");
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let state = initialize_backend_with_store(MemoryStore::new(), AppConfig::default());
        let response = get_public_profile(State(state), Path("ghost".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_taken_slug_conflicts() {
        let state = initialize_backend_with_store(MemoryStore::new(), AppConfig::default());

        save_profile(
            State(state.clone()),
            family_headers(),
            Json(save_request("Maria", Some("maria"))),
        )
        .await;

        let mut other_headers = HeaderMap::new();
        other_headers.insert("x-user-id", "other".parse().unwrap());
        let response = save_profile(
            State(state),
            other_headers,
            Json(save_request("Marias Zwilling", Some("maria"))),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
