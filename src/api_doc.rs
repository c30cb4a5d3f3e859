use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse};
use crate::handlers;
use crate::models::{
    ConfigResponse, Item, ItemPatch, MessageResponse, RootResponse, SecretsResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "item-store API",
        version = "1.0.0",
        description = "A simple in-memory item CRUD service with pass-through relational and graph endpoints"
    ),
    paths(
        handlers::system::root_handler,
        handlers::system::health_handler,
        handlers::config::config_handler,
        handlers::config::secrets_handler,
        handlers::items::list_items_handler,
        handlers::items::get_item_handler,
        handlers::items::create_item_handler,
        handlers::items::update_item_handler,
        handlers::items::delete_item_handler,
        handlers::items::search_items_handler,
        handlers::upstream::users_handler,
        handlers::upstream::graph_handler
    ),
    components(
        schemas(
            Item,
            ItemPatch,
            MessageResponse,
            RootResponse,
            ConfigResponse,
            SecretsResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Liveness operations"),
        (name = "config", description = "Resolved configuration"),
        (name = "items", description = "Item CRUD operations"),
        (name = "upstream", description = "Relational and graph store pass-through")
    )
)]
pub struct ApiDoc;
