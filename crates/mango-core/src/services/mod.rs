//! Domain services

pub mod id_locks;
pub mod menu_item_service;

pub use id_locks::IdLocks;
pub use menu_item_service::{ImageUpload, MenuItemService};
