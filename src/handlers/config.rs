use crate::models::{ConfigResponse, SecretsResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /config handler - Non-secret configuration values
#[utoipa::path(
    get,
    path = routes::CONFIG,
    responses(
        (status = 200, description = "Resolved configuration", body = ConfigResponse)
    ),
    tag = "config"
)]
pub async fn config_handler(State(state): State<AppState>) -> (StatusCode, Json<ConfigResponse>) {
    let config = &state.config;
    (
        StatusCode::OK,
        Json(ConfigResponse {
            environment: config.environment.clone(),
            log_level: config.log_level.clone(),
            cors_origins: config.cors_origins.clone(),
            api_version: config.api_version.clone(),
            debug: config.debug,
        }),
    )
}

/// GET /secrets handler - Resolved secret values
///
/// Only routed when `DEBUG` is true and the environment is not production.
#[utoipa::path(
    get,
    path = routes::SECRETS,
    responses(
        (status = 200, description = "Resolved secrets (debug deployments only)", body = SecretsResponse),
        (status = 404, description = "Secrets endpoint disabled")
    ),
    tag = "config"
)]
pub async fn secrets_handler(State(state): State<AppState>) -> (StatusCode, Json<SecretsResponse>) {
    tracing::warn!("Serving secret values over HTTP");
    let secrets = &state.config.secrets;
    (
        StatusCode::OK,
        Json(SecretsResponse {
            api_token: secrets.api_token.clone(),
            database_password: secrets.database_password.clone(),
            jwt_secret: secrets.jwt_secret.clone(),
        }),
    )
}
