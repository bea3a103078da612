//! # REST API Interface Layer
//!
//! HTTP endpoints for the diaper tracker. This layer translates DTOs into
//! service calls and domain errors into HTTP status codes; it holds no
//! business logic of its own.
//!
//! Identity arrives as an `x-user-id` header set by the authenticating
//! proxy in front of this service. Handlers resolve admin status per
//! request through the domain layer, never from ambient state.

pub mod admin_apis;
pub mod age_group_apis;
pub mod dashboard_apis;
pub mod donation_apis;
pub mod page_settings_apis;
pub mod profile_apis;
pub mod purchase_apis;
pub mod reminder_apis;
pub mod report_apis;
pub mod slug_apis;
pub mod stock_apis;
pub mod usage_apis;

use axum::http::{HeaderMap, StatusCode};

/// Extract the authenticated account ID from the request headers.
pub(crate) fn require_user(headers: &HeaderMap) -> Result<String, (StatusCode, &'static str)> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
        .ok_or((StatusCode::UNAUTHORIZED, "Missing x-user-id header"))
}

/// Map a domain error message onto an HTTP status.
pub(crate) fn error_status(message: &str) -> StatusCode {
    if message.contains("not found") || message.contains("Not found") {
        StatusCode::NOT_FOUND
    } else if message.contains("already taken") || message.contains("already registered") {
        StatusCode::CONFLICT
    } else if message.contains("Admin privileges required") {
        StatusCode::FORBIDDEN
    } else if message.contains("cannot be empty")
        || message.contains("must be greater than zero")
        || message.contains("Invalid email")
        || message.contains("is not pending")
        || message.contains("your own")
    {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
