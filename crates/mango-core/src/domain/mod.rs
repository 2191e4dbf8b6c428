//! # Mango Core - Domain Module
//! 
//! Domain entities for the menu catalog.

pub mod menu_item;

pub use menu_item::{MenuItem, MenuItemFields};
