//! # Mango Infrastructure
//! 
//! PostgreSQL and filesystem implementations of the core ports (adapters).

pub mod database;
pub mod storage;

pub use database::{create_pool, run_migrations, PgMenuItemRepository};
pub use storage::FsAssetStore;
