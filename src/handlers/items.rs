use crate::error::{ApiError, ErrorResponse};
use crate::models::{Item, ItemPatch, MessageResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    Json,
};

/// Item id taken from the path
///
/// Any integer is accepted; one that cannot name a stored item (negative)
/// is rejected as not found. A non-integer segment is a 400 with a JSON body.
pub struct ItemId(pub u64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<i64>::from_request_parts(parts, state).await?;
        u64::try_from(raw)
            .map(ItemId)
            .map_err(|_| ApiError::ItemNotFound(raw.to_string()))
    }
}

/// GET /items handler - All items in insertion order
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "All items", body = Vec<Item>)
    ),
    tag = "items"
)]
pub async fn list_items_handler(State(state): State<AppState>) -> (StatusCode, Json<Vec<Item>>) {
    let items = state.store.list().await;
    tracing::info!("Listed {} items", items.len());
    (StatusCode::OK, Json(items))
}

/// GET /items/{id} handler
#[utoipa::path(
    get,
    path = routes::ITEM,
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.store.get(id).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// POST /items handler - Create an item, absent fields take their defaults
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Item created", body = Item)
    ),
    tag = "items"
)]
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(patch): Json<ItemPatch>,
) -> (StatusCode, Json<Item>) {
    let item = state.store.create(patch).await;
    tracing::info!("Created item {} ({:?})", item.id, item.name);
    (StatusCode::OK, Json(item))
}

/// PUT /items/{id} handler - Replace only the supplied fields
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    Json(patch): Json<ItemPatch>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.store.update(id, patch).await?;
    tracing::info!("Updated item {}", id);
    Ok((StatusCode::OK, Json(item)))
}

/// DELETE /items/{id} handler
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let removed = state.store.delete(id).await?;
    tracing::info!("Deleted item {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: format!("Item '{}' deleted successfully", removed.name),
        }),
    ))
}

/// GET /items/search/{name} handler - Case-insensitive name search
#[utoipa::path(
    get,
    path = routes::ITEM_SEARCH,
    params(
        ("name" = String, Path, description = "Substring to look for in item names")
    ),
    responses(
        (status = 200, description = "Matching items", body = Vec<Item>)
    ),
    tag = "items"
)]
pub async fn search_items_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> (StatusCode, Json<Vec<Item>>) {
    let matches = state.store.search_by_name(&name).await;
    tracing::info!("Search for {:?} matched {} items", name, matches.len());
    (StatusCode::OK, Json(matches))
}
