//! Plain-text liveness endpoints kept for existing clients.

use axum::{Router, routing::get};

pub const BANNER: &str =
    "Food Delivery API is running! Endpoints: POST /users, GET /users/{id}, GET /users";

/// Service banner listing the main endpoints
#[utoipa::path(
    get,
    path = "/api/",
    tag = "Status",
    responses((status = 200, description = "Service banner", body = String, content_type = "text/plain"))
)]
pub async fn home() -> &'static str {
    BANNER
}

/// Smoke-test endpoint
#[utoipa::path(
    get,
    path = "/api/test",
    tag = "Status",
    responses((status = 200, description = "Always succeeds", body = String, content_type = "text/plain"))
)]
pub async fn test_endpoint() -> &'static str {
    "Test endpoint works!"
}

pub fn router() -> Router {
    Router::new()
        .route("/api/", get(home))
        .route("/api/test", get(test_endpoint))
}
