use crate::error::HealthResponse;
use crate::models::RootResponse;
use crate::routes;
use axum::{http::StatusCode, Json};

/// GET / handler - Service banner
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    ),
    tag = "health"
)]
pub async fn root_handler() -> (StatusCode, Json<RootResponse>) {
    (
        StatusCode::OK,
        Json(RootResponse {
            message: "Welcome to the Item Store API!".to_string(),
            status: "running".to_string(),
        }),
    )
}

/// GET /health handler - Liveness check
///
/// The item store lives in memory, so a running process is a healthy one.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    tracing::debug!("Health check passed");
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "API is running".to_string(),
        }),
    )
}
