use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Custom error type for API endpoints
///
/// Maps each failure to an HTTP status code and a `{"detail": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// No item with the requested id
    ItemNotFound(String),
    /// Path segment could not be parsed
    InvalidPath(String),
    /// Relational or graph store call failed, or the store is unavailable
    Upstream(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::ItemNotFound(id) => {
                tracing::debug!(%id, "item not found");
                (StatusCode::NOT_FOUND, "Item not found".to_string())
            }
            ApiError::InvalidPath(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Upstream(err) => {
                tracing::error!("Upstream error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::ItemNotFound(id.to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Upstream(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    async fn body_of(response: Response) -> ErrorResponse {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = ApiError::from(StoreError::NotFound(5)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await.detail, "Item not found");
    }

    #[tokio::test]
    async fn test_invalid_path_maps_to_400_with_json_body() {
        let response = ApiError::InvalidPath("Invalid URL: bad id".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await.detail, "Invalid URL: bad id");
    }

    #[tokio::test]
    async fn test_upstream_maps_to_500_with_error_text() {
        let err = anyhow!("connection refused").context("Failed to query users");
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = body_of(response).await.detail;
        assert!(detail.contains("Failed to query users"));
        assert!(detail.contains("connection refused"));
    }
}
