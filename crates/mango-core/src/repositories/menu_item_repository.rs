//! Menu item repository trait (port)

use async_trait::async_trait;
use crate::domain::MenuItem;
use crate::error::DomainError;

/// Persistence for menu item records. Every method is a single-row atomic write
/// or a plain read; no method spans more than one statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// All records, ordered by id ascending.
    async fn list(&self) -> Result<Vec<MenuItem>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError>;
    /// Insert a new record; the returned copy carries the store-assigned id.
    async fn insert(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    /// Replace the mutable fields of `item.id`. Fails with `NotFound` if absent.
    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    /// Fails with `NotFound` if absent.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}
