//! # REST API for Donations
//!
//! Two entry points write donations: the authenticated family route, which
//! applies straight to stock, and the public route used from the shared
//! profile page, which queues the donation for moderation.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};

use crate::rest::{error_status, require_user};
use crate::AppState;
use shared::CreateDonationRequest;

/// Create a router for donation related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_donation))
        .route("/recent", get(list_recent_donations))
        .route("/pending", get(list_pending_donations))
        .route("/:id/approve", post(approve_donation))
        .route("/:id/reject", post(reject_donation))
}

/// Router for the anonymous public donation endpoint
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", post(create_public_donation))
}

/// Register a donation as the authenticated family
pub async fn create_donation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateDonationRequest>,
) -> impl IntoResponse {
    info!("POST /api/donations - request: {:?}", request);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state
        .donation_service
        .record_donation(Some(&user_id), request)
        .await
    {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create donation: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Register an anonymous donation from the public page
pub async fn create_public_donation(
    State(state): State<AppState>,
    Json(request): Json<CreateDonationRequest>,
) -> impl IntoResponse {
    info!("POST /api/public/donations - request: {:?}", request);

    match state.donation_service.record_donation(None, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create public donation: {}", e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// List recent donations for the caller's groups
pub async fn list_recent_donations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("GET /api/donations/recent");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.donation_service.list_recent(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list recent donations: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing donations").into_response()
        }
    }
}

/// List donations awaiting moderation
pub async fn list_pending_donations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("GET /api/donations/pending");

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.donation_service.list_pending(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list pending donations: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing donations").into_response()
        }
    }
}

/// Approve a pending donation and apply it to stock
pub async fn approve_donation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/donations/{}/approve", id);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.donation_service.approve(&user_id, &id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to approve donation {}: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

/// Reject a pending donation
pub async fn reject_donation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/donations/{}/reject", id);

    let user_id = match require_user(&headers) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.donation_service.reject(&user_id, &id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to reject donation {}: {}", id, e);
            (error_status(&e.to_string()), e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize_backend_with_store;
    use crate::storage::{AgeGroupStorage as _, MemoryStore, StockStorage as _};
    use axum::body::to_bytes;
    use axum::response::Response;
    use chrono::Utc;

    fn test_state() -> (AppState, MemoryStore) {
        let store = MemoryStore::new();
        let state = initialize_backend_with_store(store.clone(), crate::config::AppConfig::default());
        (state, store)
    }

    fn seed_group(store: &MemoryStore, id: &str) {
        let now = Utc::now();
        store
            .store_age_group(&crate::domain::models::AgeGroup {
                id: id.to_string(),
                user_id: "family".to_string(),
                name: "P".to_string(),
                age_range: "0-3 meses".to_string(),
                estimated_quantity: 100,
                price_per_unit: 0.5,
                color_theme: None,
                icon_name: None,
                created_at: now,
                updated_at: now,
            })
            .unwrap();
        store
            .store_stock_entry(&crate::domain::models::StockEntry {
                id: format!("stock-{}", id),
                user_id: "family".to_string(),
                age_group_id: id.to_string(),
                current_quantity: 0,
                notes: None,
                last_updated_at: now,
            })
            .unwrap();
    }

    fn family_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "family".parse().unwrap());
        headers
    }

    fn request(group_id: &str, quantity: u32) -> CreateDonationRequest {
        CreateDonationRequest {
            age_group_id: group_id.to_string(),
            quantity,
            donor_name: Some("Tia Carla".to_string()),
            donor_contact: None,
            donor_email: None,
            notes: None,
            donation_date: None,
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_public_donation_is_created_pending() {
        let (state, store) = test_state();
        seed_group(&store, "g");

        let response = create_public_donation(State(state), Json(request("g", 12)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["donation"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_family_donation_applies_to_stock() {
        let (state, store) = test_state();
        seed_group(&store, "g");

        let response = create_donation(State(state), family_headers(), Json(request("g", 12)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let stock = store.get_stock_for_group("g").unwrap().unwrap();
        assert_eq!(stock.current_quantity, 12);
    }

    #[tokio::test]
    async fn test_zero_quantity_returns_bad_request() {
        let (state, store) = test_state();
        seed_group(&store, "g");

        let response = create_public_donation(State(state), Json(request("g", 0)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_user_header_is_unauthorized() {
        let (state, store) = test_state();
        seed_group(&store, "g");

        let response = create_donation(State(state), HeaderMap::new(), Json(request("g", 5)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_approve_flow_over_handlers() {
        let (state, store) = test_state();
        seed_group(&store, "g");

        let created = create_public_donation(State(state.clone()), Json(request("g", 12)))
            .await
            .into_response();
        let id = body_json(created).await["donation"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = approve_donation(State(state), family_headers(), Path(id))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let stock = store.get_stock_for_group("g").unwrap().unwrap();
        assert_eq!(stock.current_quantity, 12);
    }
}
