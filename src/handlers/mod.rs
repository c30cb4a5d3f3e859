pub mod config;
pub mod items;
pub mod system;
pub mod upstream;

pub use config::{config_handler, secrets_handler};
pub use items::{
    create_item_handler, delete_item_handler, get_item_handler, list_items_handler,
    search_items_handler, update_item_handler,
};
pub use system::{health_handler, root_handler};
pub use upstream::{graph_handler, users_handler};
