//! In-memory object store used by tests

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{DomainError, DomainResult};

use super::traits::ObjectStore;

/// In-memory object store. Failure rules let tests make individual puts or
/// deletes fail by path substring.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: DashMap<String, Vec<u8>>,
    fail_rules: DashMap<&'static str, String>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `put` whose path contains `fragment` fail
    pub fn fail_puts_containing(&self, fragment: impl Into<String>) {
        self.fail_rules.insert("put", fragment.into());
    }

    /// Make every `delete` whose path contains `fragment` fail
    pub fn fail_deletes_containing(&self, fragment: impl Into<String>) {
        self.fail_rules.insert("delete", fragment.into());
    }

    pub fn clear_failure_rules(&self) {
        self.fail_rules.clear();
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn should_fail(&self, op: &'static str, path: &str) -> bool {
        self.fail_rules
            .get(op)
            .map(|fragment| path.contains(fragment.value().as_str()))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> DomainResult<String> {
        if self.should_fail("put", path) {
            return Err(DomainError::ObjectStore(format!(
                "simulated put failure for '{}'",
                path
            )));
        }
        self.objects.insert(path.to_string(), bytes.to_vec());
        Ok(format!("memory://{}", path))
    }

    async fn delete(&self, path: &str) -> DomainResult<()> {
        if self.should_fail("delete", path) {
            return Err(DomainError::ObjectStore(format!(
                "simulated delete failure for '{}'",
                path
            )));
        }
        self.objects.remove(path);
        Ok(())
    }

    async fn exists(&self, path: &str) -> DomainResult<bool> {
        Ok(self.objects.contains_key(path))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_exists_delete_round_trip() {
        let store = MemoryObjectStore::new();
        let url = store.put("a/before/1-x.jpg", b"img").await.unwrap();
        assert_eq!(url, "memory://a/before/1-x.jpg");
        assert!(store.exists("a/before/1-x.jpg").await.unwrap());
        store.delete("a/before/1-x.jpg").await.unwrap();
        assert!(!store.exists("a/before/1-x.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn rigged_puts_fail_only_matching_paths() {
        let store = MemoryObjectStore::new();
        store.fail_puts_containing("/after/");
        assert!(store.put("a/before/1-x.jpg", b"img").await.is_ok());
        assert!(store.put("a/after/1-x.jpg", b"img").await.is_err());
        assert_eq!(store.object_count(), 1);
    }

    #[tokio::test]
    async fn rigged_deletes_fail_and_keep_the_object() {
        let store = MemoryObjectStore::new();
        store.put("a/before/1-x.jpg", b"img").await.unwrap();
        store.fail_deletes_containing("before");
        assert!(store.delete("a/before/1-x.jpg").await.is_err());
        assert!(store.exists("a/before/1-x.jpg").await.unwrap());
        store.clear_failure_rules();
        assert!(store.delete("a/before/1-x.jpg").await.is_ok());
    }
}
