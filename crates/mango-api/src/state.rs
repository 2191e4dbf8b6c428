use std::sync::Arc;
use mango_core::services::MenuItemService;

#[derive(Clone)]
pub struct AppState {
    pub menu_items: Arc<MenuItemService>,
}

impl AppState {
    pub fn new(menu_items: Arc<MenuItemService>) -> Self {
        Self { menu_items }
    }
}
