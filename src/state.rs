use crate::config::Config;
use crate::store::ItemStore;
use crate::upstream::{GraphSource, UserSource};
use std::sync::Arc;

/// Shared application state
///
/// The upstream sources are `None` when the store is not configured or
/// could not be reached at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: ItemStore,
    pub config: Arc<Config>,
    pub users: Option<Arc<dyn UserSource>>,
    pub graph: Option<Arc<dyn GraphSource>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: ItemStore::new(),
            config: Arc::new(config),
            users: None,
            graph: None,
        }
    }
}
