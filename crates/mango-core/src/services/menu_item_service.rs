// ============================================================================
// Mango Core - Menu Item Service
// File: crates/mango-core/src/services/menu_item_service.rs
// ============================================================================
//! Menu item CRUD that keeps the record and its image asset consistent.
//!
//! The relational store and the asset store share no transaction, so writes
//! follow a fixed ordering instead:
//! - create: write asset, insert record, delete the asset if the insert fails
//! - update with image: write new asset, persist record, then delete old asset
//! - delete: delete record, then delete asset
//!
//! Update and delete on the same id are serialized through [`IdLocks`].
//! Every mutation runs on its own task, so a dropped caller (for example a
//! disconnected client) cannot stop it between the asset and record steps.

use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::{MenuItem, MenuItemFields};
use crate::error::DomainError;
use crate::repositories::MenuItemRepository;
use crate::services::IdLocks;
use crate::storage::AssetStore;

/// Uploaded image content with the client-side file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Clone)]
pub struct MenuItemService {
    repo: Arc<dyn MenuItemRepository>,
    assets: Arc<dyn AssetStore>,
    locks: IdLocks,
}

impl MenuItemService {
    pub fn new(repo: Arc<dyn MenuItemRepository>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            repo,
            assets,
            locks: IdLocks::new(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn MenuItemRepository> {
        &self.repo
    }

    pub async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.repo.list().await.map_err(|e| {
            error!("Failed to list menu items: {}", e);
            e
        })
    }

    pub async fn get(&self, id: i32) -> Result<MenuItem, DomainError> {
        ensure_valid_id(id)?;
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Menu item {} not found", id);
            DomainError::NotFound(id)
        })
    }

    /// Create a menu item together with its image. The image is mandatory.
    pub async fn create(
        &self,
        fields: MenuItemFields,
        image: Option<ImageUpload>,
    ) -> Result<MenuItem, DomainError> {
        let service = self.clone();
        run_to_completion(async move { service.create_inner(fields, image).await }).await
    }

    /// Replace the mutable fields of `id`; swap the image only when a new one is supplied.
    ///
    /// `payload_id` is the id carried in the request body and must equal `id`.
    pub async fn update(
        &self,
        id: i32,
        payload_id: i32,
        fields: MenuItemFields,
        image: Option<ImageUpload>,
    ) -> Result<MenuItem, DomainError> {
        let service = self.clone();
        run_to_completion(async move { service.update_inner(id, payload_id, fields, image).await })
            .await
    }

    /// Remove the record and its image. Returns a confirmation message.
    pub async fn delete(&self, id: i32) -> Result<String, DomainError> {
        let service = self.clone();
        run_to_completion(async move { service.delete_inner(id).await }).await
    }

    async fn create_inner(
        &self,
        fields: MenuItemFields,
        image: Option<ImageUpload>,
    ) -> Result<MenuItem, DomainError> {
        let fields = fields.checked()?;
        let image = image
            .filter(|upload| !upload.is_empty())
            .ok_or_else(|| {
                warn!("Create rejected: image missing for {}", fields.name);
                DomainError::validation("File is missing.")
            })?;

        // 1. Asset first; nothing references it yet
        let reference = self.assets.write(&image.content, &image.file_name).await?;

        // 2. Record pointing at it
        match self.repo.insert(&MenuItem::new(fields, reference.clone())).await {
            Ok(created) => {
                info!("Created menu item {} with image {}", created.id, created.image);
                Ok(created)
            }
            Err(e) => {
                error!("Failed to insert menu item: {}", e);
                self.discard_asset(&reference).await;
                Err(e)
            }
        }
    }

    async fn update_inner(
        &self,
        id: i32,
        payload_id: i32,
        fields: MenuItemFields,
        image: Option<ImageUpload>,
    ) -> Result<MenuItem, DomainError> {
        ensure_valid_id(id)?;
        if payload_id != id {
            warn!("Update rejected: path id {} does not match payload id {}", id, payload_id);
            return Err(DomainError::validation(
                "Menu item ID in the request body does not match the URL.",
            ));
        }
        let fields = fields.checked()?;
        let image = image.filter(|upload| !upload.is_empty());

        let _guard = self.locks.acquire(id).await;

        let mut item = self.repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Update rejected: menu item {} not found", id);
            DomainError::NotFound(id)
        })?;
        let previous_image = item.image.clone();
        item.apply(fields);

        // 1. New asset is written before anything points away from the old one
        let new_reference = match image {
            Some(upload) => {
                let reference = self.assets.write(&upload.content, &upload.file_name).await?;
                item.image = reference.clone();
                Some(reference)
            }
            None => None,
        };

        // 2. Switch the record
        let updated = match self.repo.update(&item).await {
            Ok(updated) => updated,
            Err(e) => {
                error!("Failed to update menu item {}: {}", id, e);
                if let Some(reference) = &new_reference {
                    self.discard_asset(reference).await;
                }
                return Err(e);
            }
        };

        // 3. Old asset is unreferenced only now
        if new_reference.is_some() && !previous_image.is_empty() {
            self.discard_asset(&previous_image).await;
        }

        info!("Updated menu item {}", id);
        Ok(updated)
    }

    async fn delete_inner(&self, id: i32) -> Result<String, DomainError> {
        ensure_valid_id(id)?;

        let _guard = self.locks.acquire(id).await;

        let item = self.repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Delete rejected: menu item {} not found", id);
            DomainError::NotFound(id)
        })?;

        self.repo.delete(id).await.map_err(|e| {
            error!("Failed to delete menu item {}: {}", id, e);
            e
        })?;

        if item.has_image() {
            self.discard_asset(&item.image).await;
        }

        info!("Deleted menu item {}", id);
        Ok(format!("Menu item with ID {} was successfully deleted.", id))
    }

    /// Best-effort removal of an asset no record refers to.
    async fn discard_asset(&self, reference: &str) {
        if let Err(e) = self.assets.delete(reference).await {
            warn!("Orphaned asset {} could not be removed: {}", reference, e);
        }
    }
}

/// Await `operation` on a spawned task; dropping the returned future detaches
/// the task instead of cancelling it.
async fn run_to_completion<T, F>(operation: F) -> Result<T, DomainError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, DomainError>> + Send + 'static,
{
    tokio::spawn(operation).await.map_err(|e| {
        error!("Menu item operation aborted: {}", e);
        DomainError::Internal(e.to_string())
    })?
}

fn ensure_valid_id(id: i32) -> Result<(), DomainError> {
    if id <= 0 {
        warn!("Rejected invalid menu item id {}", id);
        return Err(DomainError::validation("Invalid ID."));
    }
    Ok(())
}
