//! # REST API for Slug Checks
//!
//! Backs the URL field in the profile settings form. The form debounces;
//! these endpoints are read-only and safe to call on every keystroke.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;

use crate::AppState;

/// Create a router for slug related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check", get(check_slug))
        .route("/suggest", get(suggest_slug))
}

#[derive(Debug, Deserialize)]
pub struct CheckSlugQuery {
    pub slug: String,
    /// The caller's currently saved slug, if any
    pub current: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestSlugQuery {
    pub name: String,
    pub current: Option<String>,
}

/// Check whether a candidate slug is available
pub async fn check_slug(
    State(state): State<AppState>,
    Query(query): Query<CheckSlugQuery>,
) -> impl IntoResponse {
    info!("GET /api/slug/check - slug: {}", query.slug);

    let response = state
        .slug_service
        .check_availability(&query.slug, query.current.as_deref())
        .await;
    (StatusCode::OK, Json(response)).into_response()
}

/// Suggest a free slug derived from a display name
pub async fn suggest_slug(
    State(state): State<AppState>,
    Query(query): Query<SuggestSlugQuery>,
) -> impl IntoResponse {
    info!("GET /api/slug/suggest - name: {}", query.name);

    let response = state
        .slug_service
        .suggest_for_name(&query.name, query.current.as_deref())
        .await;
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::initialize_backend_with_store;
    use crate::storage::MemoryStore;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_check_free_slug() {
        let state = initialize_backend_with_store(MemoryStore::new(), AppConfig::default());

        let response = check_slug(
            State(state),
            Query(CheckSlugQuery {
                slug: "maria".to_string(),
                current: None,
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["is_available"], true);
    }

    #[tokio::test]
    async fn test_suggest_sanitizes_name() {
        let state = initialize_backend_with_store(MemoryStore::new(), AppConfig::default());

        let response = suggest_slug(
            State(state),
            Query(SuggestSlugQuery {
                name: "Maria Clara!!".to_string(),
                current: None,
            }),
        )
        .await
        .into_response();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["suggestion"], "maria-clara");
    }
}
