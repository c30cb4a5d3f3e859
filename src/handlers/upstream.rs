use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use anyhow::anyhow;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value as JsonValue;

/// GET /api/users handler - Rows from the relational store, passed through verbatim
#[utoipa::path(
    get,
    path = routes::USERS,
    responses(
        (status = 200, description = "User rows", body = Vec<serde_json::Value>),
        (status = 500, description = "Relational store error", body = ErrorResponse)
    ),
    tag = "upstream"
)]
pub async fn users_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<JsonValue>>), ApiError> {
    let users = state
        .users
        .as_ref()
        .ok_or_else(|| anyhow!("Relational store is not connected"))?;

    let rows = users.list_users().await?;
    tracing::info!("Returned {} user rows", rows.len());
    Ok((StatusCode::OK, Json(rows)))
}

/// GET /api/graph handler - Nodes from the graph store, passed through verbatim
#[utoipa::path(
    get,
    path = routes::GRAPH,
    responses(
        (status = 200, description = "Graph nodes", body = Vec<serde_json::Value>),
        (status = 500, description = "Graph store error", body = ErrorResponse)
    ),
    tag = "upstream"
)]
pub async fn graph_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<JsonValue>>), ApiError> {
    let graph = state
        .graph
        .as_ref()
        .ok_or_else(|| anyhow!("Graph store is not connected"))?;

    let nodes = graph.list_nodes().await?;
    tracing::info!("Returned {} graph nodes", nodes.len());
    Ok((StatusCode::OK, Json(nodes)))
}
