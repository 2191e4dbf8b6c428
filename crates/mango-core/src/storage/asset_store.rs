//! Binary asset storage addressed by generated references

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::DomainError;

/// Blob storage for menu item images.
///
/// A reference is the relative path handed back by [`AssetStore::write`]
/// (e.g. `/Images/0b6f…e1.png`). It is what gets persisted in `MenuItem::image`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `content` under a fresh unique name that keeps the extension of
    /// `original_file_name`. A reader never sees a partially written file under
    /// the returned reference.
    async fn write(&self, content: &[u8], original_file_name: &str) -> Result<String, DomainError>;

    /// Remove the asset. A missing file is not an error.
    async fn delete(&self, reference: &str) -> Result<(), DomainError>;

    async fn exists(&self, reference: &str) -> Result<bool, DomainError>;

    /// Absolute location of `reference`. Pure path computation.
    fn resolve(&self, reference: &str) -> PathBuf;
}
