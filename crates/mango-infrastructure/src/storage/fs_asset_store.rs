//! Filesystem asset store.
//!
//! Files live under `{content_root}/{image_dir}/{uuid}{.ext}` and are referenced
//! as `/{image_dir}/{uuid}{.ext}`, which is also the URL path a static file
//! server mounted on `content_root` exposes them at.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use mango_core::error::DomainError;
use mango_core::storage::AssetStore;

const MAX_EXTENSION_LEN: usize = 16;

pub struct FsAssetStore {
    content_root: PathBuf,
    image_dir: String,
}

impl FsAssetStore {
    pub fn new(content_root: impl Into<PathBuf>, image_dir: impl Into<String>) -> Self {
        let content_root = content_root.into();
        let content_root = std::path::absolute(&content_root).unwrap_or(content_root);
        Self {
            content_root,
            image_dir: image_dir.into().trim_matches('/').to_string(),
        }
    }

    /// Directory holding the images, i.e. what a static file server should mount.
    pub fn image_root(&self) -> PathBuf {
        self.content_root.join(&self.image_dir)
    }

    pub fn image_dir(&self) -> &str {
        &self.image_dir
    }

    fn generate_name(original_file_name: &str) -> String {
        let extension = Path::new(original_file_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| {
                !e.is_empty() && e.len() <= MAX_EXTENSION_LEN && e.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();
        format!("{}{}", Uuid::new_v4(), extension)
    }

    async fn write_via_temp(target: &Path, temp: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(temp).await?;
        file.write_all(content).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(temp, target).await
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn write(&self, content: &[u8], original_file_name: &str) -> Result<String, DomainError> {
        let name = Self::generate_name(original_file_name);
        let dir = self.image_root();
        let target = dir.join(&name);
        let temp = dir.join(format!(".{}.tmp", name));

        fs::create_dir_all(&dir).await.map_err(|e| {
            warn!(dir = %dir.display(), error = %e, "asset_store: create_dir_all failed");
            DomainError::Io(e.to_string())
        })?;

        if let Err(e) = Self::write_via_temp(&target, &temp, content).await {
            warn!(path = %target.display(), error = %e, "asset_store: write failed");
            let _ = fs::remove_file(&temp).await;
            return Err(DomainError::Io(e.to_string()));
        }

        let reference = format!("/{}/{}", self.image_dir, name);
        debug!(reference = %reference, size = content.len(), "asset_store: stored");
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), DomainError> {
        let path = self.resolve(reference);
        if path == self.content_root {
            return Ok(());
        }

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(reference = %reference, "asset_store: deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(reference = %reference, "asset_store: already gone");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "asset_store: delete failed");
                Err(DomainError::Io(e.to_string()))
            }
        }
    }

    async fn exists(&self, reference: &str) -> Result<bool, DomainError> {
        let path = self.resolve(reference);
        if path == self.content_root {
            return Ok(false);
        }
        fs::try_exists(&path)
            .await
            .map_err(|e| DomainError::Io(e.to_string()))
    }

    fn resolve(&self, reference: &str) -> PathBuf {
        // Only plain components are kept, so the result never leaves content_root.
        Path::new(reference)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part),
                _ => None,
            })
            .fold(self.content_root.clone(), |path, part| path.join(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FsAssetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAssetStore::new(dir.path(), "Images");
        (dir, store)
    }

    #[tokio::test]
    async fn test_write_preserves_extension_and_content() {
        let (_dir, store) = store();

        let reference = store.write(b"0123456789", "Photo.JPG").await.unwrap();

        assert!(reference.starts_with("/Images/"));
        assert!(reference.ends_with(".jpg"));
        let on_disk = std::fs::read(store.resolve(&reference)).unwrap();
        assert_eq!(on_disk, b"0123456789");
        assert!(store.exists(&reference).await.unwrap());
    }

    #[tokio::test]
    async fn test_write_creates_directory_and_leaves_no_temp_files() {
        let (_dir, store) = store();
        assert!(!store.image_root().exists());

        store.write(b"abc", "a.png").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(store.image_root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(!names[0].ends_with(".tmp"));
    }

    #[tokio::test]
    async fn test_names_are_unique() {
        let (_dir, store) = store();
        let a = store.write(b"x", "same.png").await.unwrap();
        let b = store.write(b"x", "same.png").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_missing_or_odd_extension_dropped() {
        let (_dir, store) = store();
        let plain = store.write(b"x", "README").await.unwrap();
        let odd = store.write(b"x", "evil.p/h p").await.unwrap();
        assert!(!plain.contains('.'));
        assert!(!odd.contains(' '));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, store) = store();
        let reference = store.write(b"x", "a.png").await.unwrap();

        store.delete(&reference).await.unwrap();
        assert!(!store.exists(&reference).await.unwrap());
        store.delete(&reference).await.unwrap();
        store.delete("/Images/never-written.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_failure_reports_io() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the image directory should be.
        std::fs::write(dir.path().join("Images"), b"not a dir").unwrap();
        let store = FsAssetStore::new(dir.path(), "Images");

        let err = store.write(b"x", "a.png").await.unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }

    #[test]
    fn test_resolve_stays_under_root() {
        let store = FsAssetStore::new("/srv/www", "Images");
        assert_eq!(store.resolve("/Images/a.png"), PathBuf::from("/srv/www/Images/a.png"));
        assert_eq!(store.resolve("Images/a.png"), PathBuf::from("/srv/www/Images/a.png"));
        assert_eq!(store.resolve("/../../etc/passwd"), PathBuf::from("/srv/www/etc/passwd"));
    }

    #[tokio::test]
    async fn test_empty_reference_is_noop() {
        let (_dir, store) = store();
        store.delete("").await.unwrap();
        assert!(!store.exists("").await.unwrap());
    }
}
