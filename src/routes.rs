use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

// Route path constants - single source of truth for all API paths

pub const ROOT: &str = "/";
pub const HEALTH: &str = "/health";
pub const CONFIG: &str = "/config";
pub const SECRETS: &str = "/secrets";
pub const ITEMS: &str = "/items";
pub const ITEM: &str = "/items/{id}";
pub const ITEM_SEARCH: &str = "/items/search/{name}";
pub const USERS: &str = "/api/users";
pub const GRAPH: &str = "/api/graph";
pub const DOCS: &str = "/docs";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Assemble every route, the docs UI, CORS and request tracing
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(ROOT, get(handlers::root_handler))
        .route(HEALTH, get(handlers::health_handler))
        .route(CONFIG, get(handlers::config_handler))
        .route(
            ITEMS,
            get(handlers::list_items_handler).post(handlers::create_item_handler),
        )
        .route(
            ITEM,
            get(handlers::get_item_handler)
                .put(handlers::update_item_handler)
                .delete(handlers::delete_item_handler),
        )
        .route(ITEM_SEARCH, get(handlers::search_items_handler))
        .route(USERS, get(handlers::users_handler))
        .route(GRAPH, get(handlers::graph_handler));

    if state.config.expose_secrets() {
        tracing::warn!("{} is enabled; it serves secret values and must never run in production", SECRETS);
        router = router.route(SECRETS, get(handlers::secrets_handler));
    }

    let cors = cors_layer(&state.config.cors_origins);

    router
        .merge(SwaggerUi::new(DOCS).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for the configured origins; `*` mirrors the caller's origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {:?}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
