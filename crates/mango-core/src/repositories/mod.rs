//! Repository traits (ports)

pub mod menu_item_repository;
pub mod memory;

pub use menu_item_repository::MenuItemRepository;
pub use memory::InMemoryMenuItemRepository;

#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
