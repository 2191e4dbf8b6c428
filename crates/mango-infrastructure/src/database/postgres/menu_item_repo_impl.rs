// ============================================================================
// Mango Infrastructure - PostgreSQL Menu Item Repository
// File: crates/mango-infrastructure/src/database/postgres/menu_item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use mango_core::domain::MenuItem;
use mango_core::error::DomainError;
use mango_core::repositories::MenuItemRepository;

pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub special_tag: String,
    pub category: String,
    pub price: f64,
    pub image: String,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            description: row.description,
            special_tag: row.special_tag,
            category: row.category,
            price: row.price,
            image: row.image,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::Persistence(e.to_string())
}

#[async_trait]
impl MenuItemRepository for PgMenuItemRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, special_tag, category, price, image
            FROM menu_items
            ORDER BY id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing menu items", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, special_tag, category, price, image
            FROM menu_items
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding menu item by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn insert(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let row: MenuItemRow = sqlx::query_as(
            r#"
            INSERT INTO menu_items (name, description, special_tag, category, price, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, special_tag, category, price, image
            "#
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.special_tag)
        .bind(&item.category)
        .bind(item.price)
        .bind(&item.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("inserting menu item", e))?;

        info!("Menu item inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            UPDATE menu_items
            SET
                name = $2,
                description = $3,
                special_tag = $4,
                category = $5,
                price = $6,
                image = $7
            WHERE id = $1
            RETURNING id, name, description, special_tag, category, price, image
            "#
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.special_tag)
        .bind(&item.category)
        .bind(item.price)
        .bind(&item.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating menu item", e))?;

        row.map(Into::into).ok_or(DomainError::NotFound(item.id))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting menu item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting menu items", e))
    }
}
