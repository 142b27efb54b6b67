//! Filesystem-backed object store

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::{DomainError, DomainResult};

use super::traits::ObjectStore;

/// Stores objects as files under a root directory and serves them from a
/// public base URL (the router mounts the root directory at that URL).
pub struct FsObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn absolute(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), path)
    }
}

fn io_error(e: std::io::Error) -> DomainError {
    DomainError::ObjectStore(e.to_string())
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> DomainResult<String> {
        let target = self.absolute(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        fs::write(&target, bytes).await.map_err(io_error)?;
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> DomainResult<()> {
        match fs::remove_file(self.absolute(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }

    async fn exists(&self, path: &str) -> DomainResult<bool> {
        fs::try_exists(self.absolute(path)).await.map_err(io_error)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store() -> (FsObjectStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("aquashine-store-{}", uuid::Uuid::new_v4()));
        (FsObjectStore::new(&root, "/uploads"), root)
    }

    #[tokio::test]
    async fn put_returns_the_public_url() {
        let (store, root) = scratch_store();
        let url = store.put("sedans/before/7-a.jpg", b"jpeg").await.unwrap();
        assert_eq!(url, "/uploads/sedans/before/7-a.jpg");
        assert!(store.exists("sedans/before/7-a.jpg").await.unwrap());
        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (store, root) = scratch_store();
        store.put("sedans/after/7-b.jpg", b"jpeg").await.unwrap();
        store.delete("sedans/after/7-b.jpg").await.unwrap();
        assert!(!store.exists("sedans/after/7-b.jpg").await.unwrap());
        // Deleting again must not fail
        store.delete("sedans/after/7-b.jpg").await.unwrap();
        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn base_url_trailing_slash_is_normalized() {
        let root = std::env::temp_dir().join(format!("aquashine-store-{}", uuid::Uuid::new_v4()));
        let store = FsObjectStore::new(&root, "/uploads/");
        let url = store.put("x/before/1-c.jpg", b"jpeg").await.unwrap();
        assert_eq!(url, "/uploads/x/before/1-c.jpg");
        let _ = fs::remove_dir_all(&root).await;
    }
}
