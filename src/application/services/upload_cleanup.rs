//! Upload Cleanup Worker
//!
//! Retries deletes of orphaned gallery objects in the background. An object
//! becomes orphaned when a compensating delete fails mid-saga, so the row is
//! gone but the blob is not.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use log::{debug, info, warn};
use tokio::sync::RwLock;

use crate::config::CleanupConfig;
use crate::infrastructure::object_store::ObjectStore;
use crate::infrastructure::server::ShutdownSignal;

/// Queue of object paths awaiting deletion, keyed by path with the number of
/// attempts made so far
#[derive(Clone, Default)]
pub struct CleanupQueue {
    pending: Arc<DashMap<String, u32>>,
}

impl CleanupQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an object for background deletion
    pub fn enqueue(&self, path: impl Into<String>) {
        let path = path.into();
        warn!("Orphaned upload queued for cleanup: {}", path);
        self.pending.entry(path).or_insert(0);
        metrics::gauge!("upload_cleanup_pending").set(self.pending.len() as f64);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn snapshot(&self) -> Vec<(String, u32)> {
        self.pending
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }

    fn remove(&self, path: &str) {
        self.pending.remove(path);
        metrics::gauge!("upload_cleanup_pending").set(self.pending.len() as f64);
    }

    fn record_attempt(&self, path: &str) -> u32 {
        let mut attempts = self.pending.entry(path.to_string()).or_insert(0);
        *attempts += 1;
        *attempts
    }
}

/// Upload Cleanup Worker
///
/// Runs in the background and drains the cleanup queue, giving up on an
/// object after the configured number of attempts.
pub struct UploadCleanupWorker {
    queue: CleanupQueue,
    object_store: Arc<dyn ObjectStore>,
    config: CleanupConfig,
    /// Running state
    running: Arc<RwLock<bool>>,
}

impl UploadCleanupWorker {
    pub fn new(queue: CleanupQueue, object_store: Arc<dyn ObjectStore>) -> Self {
        Self {
            queue,
            object_store,
            config: CleanupConfig::default(),
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub fn with_config(mut self, config: CleanupConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the cleanup worker background task
    pub fn start(&self, shutdown: ShutdownSignal) {
        let queue = self.queue.clone();
        let object_store = self.object_store.clone();
        let config = self.config.clone();
        let running = self.running.clone();

        tokio::spawn(async move {
            {
                let mut r = running.write().await;
                *r = true;
            }

            info!(
                "Upload cleanup worker started (interval: {}s, max attempts: {})",
                config.interval_secs, config.max_attempts
            );

            let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        drain_queue(&queue, &object_store, &config).await;
                    }
                    _ = shutdown.notified().wait() => {
                        info!("Upload cleanup worker shutting down");
                        break;
                    }
                }
            }

            {
                let mut r = running.write().await;
                *r = false;
            }

            info!("Upload cleanup worker stopped");
        });
    }

    /// Check if the worker is running
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}

/// One pass over the queue
async fn drain_queue(
    queue: &CleanupQueue,
    object_store: &Arc<dyn ObjectStore>,
    config: &CleanupConfig,
) {
    let pending = queue.snapshot();
    if pending.is_empty() {
        return;
    }

    debug!("Cleanup pass over {} orphaned objects", pending.len());

    for (path, _) in pending {
        match object_store.delete(&path).await {
            Ok(()) => {
                info!("Orphaned upload removed: {}", path);
                queue.remove(&path);
                metrics::counter!("upload_cleanup_deleted_total").increment(1);
            }
            Err(e) => {
                let attempts = queue.record_attempt(&path);
                if attempts >= config.max_attempts {
                    warn!(
                        "Giving up on orphaned upload {} after {} attempts: {}",
                        path, attempts, e
                    );
                    queue.remove(&path);
                    metrics::counter!("upload_cleanup_abandoned_total").increment(1);
                } else {
                    debug!(
                        "Cleanup attempt {}/{} failed for {}: {}",
                        attempts, config.max_attempts, path, e
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::object_store::MemoryObjectStore;

    #[tokio::test]
    async fn drain_removes_deletable_objects() {
        let store = Arc::new(MemoryObjectStore::new());
        store.put("sedans/before/1-a.jpg", b"x").await.unwrap();

        let queue = CleanupQueue::new();
        queue.enqueue("sedans/before/1-a.jpg");
        assert_eq!(queue.len(), 1);

        let store_dyn: Arc<dyn ObjectStore> = store.clone();
        drain_queue(&queue, &store_dyn, &CleanupConfig::default()).await;

        assert!(queue.is_empty());
        assert!(!store.exists("sedans/before/1-a.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn failing_deletes_are_abandoned_after_max_attempts() {
        let store = Arc::new(MemoryObjectStore::new());
        store.fail_deletes_containing("stuck");
        let queue = CleanupQueue::new();
        queue.enqueue("sedans/before/1-stuck.jpg");

        let config = CleanupConfig {
            interval_secs: 1,
            max_attempts: 3,
        };
        let store_dyn: Arc<dyn ObjectStore> = store;

        drain_queue(&queue, &store_dyn, &config).await;
        assert_eq!(queue.len(), 1);
        drain_queue(&queue, &store_dyn, &config).await;
        assert_eq!(queue.len(), 1);
        drain_queue(&queue, &store_dyn, &config).await;
        // Third failure hits max_attempts and the entry is dropped
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn enqueue_is_idempotent_per_path() {
        let queue = CleanupQueue::new();
        queue.enqueue("a/b/c.jpg");
        queue.enqueue("a/b/c.jpg");
        assert_eq!(queue.len(), 1);
    }
}
