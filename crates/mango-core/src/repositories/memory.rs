//! In-memory repository, used for local runs without PostgreSQL and in tests

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::MenuItem;
use crate::error::DomainError;
use crate::repositories::MenuItemRepository;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, MenuItem>,
    last_id: i32,
}

/// Thread-safe map-backed store with serial ids starting at 1.
#[derive(Default)]
pub struct InMemoryMenuItemRepository {
    table: RwLock<Table>,
}

impl InMemoryMenuItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryMenuItemRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let mut stored = item.clone();
        stored.id = table.last_id;
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(row.clone())
            }
            None => Err(DomainError::NotFound(item.id)),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound(id))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.table.read().await.rows.len() as i64)
    }
}
