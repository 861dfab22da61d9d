//! Filesystem Photo Store
//!
//! Stores evidence photos under the configured upload root, keyed by
//! module and user so no two submissions contend for the same path.

use std::path::{Path, PathBuf};

use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::descriptor::ModuleKey;
use crate::domain::repository::PhotoStore;
use crate::error::{EventsError, EventsResult};

/// Filesystem-backed photo store
#[derive(Clone)]
pub struct FsPhotoStore {
    root: PathBuf,
}

impl FsPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, photo_ref: &str) -> EventsResult<PathBuf> {
        // References are generated by store(); anything with a parent
        // traversal component is rejected outright.
        if Path::new(photo_ref)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(EventsError::Internal(format!(
                "Invalid photo reference: {photo_ref}"
            )));
        }
        Ok(self.root.join(photo_ref))
    }
}

/// Keep only a short alphanumeric extension from the uploaded name
fn sanitized_extension(file_name: &str) -> &str {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("bin")
}

impl PhotoStore for FsPhotoStore {
    async fn store(
        &self,
        module: ModuleKey,
        user_id: &UserId,
        file_name: &str,
        bytes: &[u8],
    ) -> EventsResult<String> {
        let ext = sanitized_extension(file_name);
        let reference = format!("{}/{}-{}.{}", module.as_str(), user_id, Uuid::new_v4(), ext);

        let path = self.root.join(&reference);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(photo = %reference, size = bytes.len(), "Photo stored");
        Ok(reference)
    }

    async fn remove(&self, photo_ref: &str) -> EventsResult<()> {
        let path = self.resolve(photo_ref)?;
        tokio::fs::remove_file(&path).await?;

        tracing::debug!(photo = %photo_ref, "Photo removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_extension() {
        assert_eq!(sanitized_extension("proof.jpg"), "jpg");
        assert_eq!(sanitized_extension("archive.tar.gz"), "gz");
        assert_eq!(sanitized_extension("noext"), "bin");
        assert_eq!(sanitized_extension("weird.j!pg"), "bin");
        assert_eq!(sanitized_extension("long.extension123"), "bin");
    }

    #[tokio::test]
    async fn test_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let user = UserId::new();

        let reference = store
            .store(ModuleKey::Mobilization, &user, "proof.jpg", b"image-bytes")
            .await
            .unwrap();

        assert!(reference.starts_with("mobilization/"));
        assert!(reference.ends_with(".jpg"));

        let stored = tokio::fs::read(dir.path().join(&reference)).await.unwrap();
        assert_eq!(stored, b"image-bytes");

        store.remove(&reference).await.unwrap();
        assert!(!dir.path().join(&reference).exists());
    }

    #[tokio::test]
    async fn test_remove_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPhotoStore::new(dir.path());

        assert!(store.remove("../outside.jpg").await.is_err());
        assert!(store.remove("/etc/passwd").await.is_err());
    }
}
