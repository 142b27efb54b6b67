//! Gallery Service
//!
//! Publishes before/after pairs through a two-phase upload: both blobs must
//! land in the object store before the row is written, and any failure rolls
//! back what was already stored. Deletes that cannot roll back are handed to
//! the cleanup worker.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, GalleryImage, ImageKind, NewGalleryImage, Storage,
};
use crate::infrastructure::object_store::{build_object_path, ObjectStore};
use crate::notifications::{
    Event, GalleryImageDeletedEvent, GalleryImagePublishedEvent, SharedEventBus,
};

use super::upload_cleanup::CleanupQueue;

/// Metadata changes for an existing gallery entry
#[derive(Debug, Clone, Default)]
pub struct GalleryImageUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Gallery Service
pub struct GalleryService {
    storage: Arc<dyn Storage>,
    object_store: Arc<dyn ObjectStore>,
    cleanup: CleanupQueue,
    event_bus: SharedEventBus,
}

impl GalleryService {
    pub fn new(
        storage: Arc<dyn Storage>,
        object_store: Arc<dyn ObjectStore>,
        cleanup: CleanupQueue,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            storage,
            object_store,
            cleanup,
            event_bus,
        }
    }

    /// Publish a new before/after pair.
    ///
    /// Upload order is before, then after, then the database row. A failure
    /// at any stage deletes what was already uploaded; if that compensating
    /// delete fails too, the path goes on the cleanup queue so the worker can
    /// retry it.
    pub async fn publish(&self, input: NewGalleryImage) -> DomainResult<GalleryImage> {
        validate_new_image(&input)?;

        let timestamp = Utc::now().timestamp();
        let before_path =
            build_object_path(&input.category, ImageKind::Before, &input.before.filename, timestamp);
        let after_path =
            build_object_path(&input.category, ImageKind::After, &input.after.filename, timestamp);

        let before_url = self.object_store.put(&before_path, &input.before.bytes).await?;

        let after_url = match self.object_store.put(&after_path, &input.after.bytes).await {
            Ok(url) => url,
            Err(e) => {
                self.rollback(&before_path).await;
                return Err(e);
            }
        };

        let now = Utc::now();
        let image = GalleryImage {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            category: input.category,
            before_url,
            after_url,
            before_path: before_path.clone(),
            after_path: after_path.clone(),
            is_featured: input.is_featured,
            display_order: input.display_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.storage.save_gallery_image(image.clone()).await {
            self.rollback(&before_path).await;
            self.rollback(&after_path).await;
            return Err(e);
        }

        info!(
            "Gallery image {} published in category {}",
            image.id, image.category
        );
        metrics::counter!("gallery_images_published_total").increment(1);

        self.event_bus
            .publish(Event::GalleryImagePublished(GalleryImagePublishedEvent {
                image_id: image.id.clone(),
                title: image.title.clone(),
                category: image.category.clone(),
                timestamp: Utc::now(),
            }));

        Ok(image)
    }

    pub async fn get(&self, id: &str) -> DomainResult<GalleryImage> {
        self.storage
            .get_gallery_image(id)
            .await?
            .ok_or_else(|| DomainError::not_found("gallery image", id))
    }

    /// Active entries only, for the public gallery page
    pub async fn list_public(&self) -> DomainResult<Vec<GalleryImage>> {
        self.storage.list_gallery_images(true).await
    }

    /// Every entry including hidden ones, for the admin screen
    pub async fn list_all(&self) -> DomainResult<Vec<GalleryImage>> {
        self.storage.list_gallery_images(false).await
    }

    /// Apply metadata changes. The stored blobs are never touched here.
    pub async fn update(&self, id: &str, changes: GalleryImageUpdate) -> DomainResult<GalleryImage> {
        let mut image = self.get(id).await?;

        if let Some(title) = changes.title {
            if title.trim().is_empty() {
                return Err(DomainError::Validation("title must not be empty".to_string()));
            }
            image.title = title;
        }
        if let Some(description) = changes.description {
            image.description = description;
        }
        if let Some(category) = changes.category {
            if category.trim().is_empty() {
                return Err(DomainError::Validation(
                    "category must not be empty".to_string(),
                ));
            }
            image.category = category;
        }
        if let Some(is_featured) = changes.is_featured {
            image.is_featured = is_featured;
        }
        if let Some(display_order) = changes.display_order {
            image.display_order = display_order;
        }
        if let Some(is_active) = changes.is_active {
            image.is_active = is_active;
        }
        image.updated_at = Utc::now();

        self.storage.update_gallery_image(image.clone()).await?;
        Ok(image)
    }

    /// Remove an entry and its blobs. The row goes first so the public site
    /// never serves an image whose files are already gone; blob deletes that
    /// fail afterwards are queued for the cleanup worker.
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let removed = self
            .storage
            .delete_gallery_image(id)
            .await?
            .ok_or_else(|| DomainError::not_found("gallery image", id))?;

        self.rollback(&removed.before_path).await;
        self.rollback(&removed.after_path).await;

        info!("Gallery image {} deleted", removed.id);
        self.event_bus
            .publish(Event::GalleryImageDeleted(GalleryImageDeletedEvent {
                image_id: removed.id,
                timestamp: Utc::now(),
            }));

        Ok(())
    }

    /// Delete a blob, falling back to the cleanup queue on failure
    async fn rollback(&self, path: &str) {
        if let Err(e) = self.object_store.delete(path).await {
            warn!("Failed to delete object {}: {}", path, e);
            self.cleanup.enqueue(path);
        }
    }
}

fn validate_new_image(input: &NewGalleryImage) -> DomainResult<()> {
    if input.title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    if input.category.trim().is_empty() {
        return Err(DomainError::Validation(
            "category must not be empty".to_string(),
        ));
    }
    if input.before.bytes.is_empty() || input.after.bytes.is_empty() {
        return Err(DomainError::Validation(
            "both before and after images are required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UploadFile;
    use crate::infrastructure::object_store::MemoryObjectStore;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::notifications::create_event_bus;

    fn upload(name: &str) -> UploadFile {
        UploadFile {
            filename: name.to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn new_image() -> NewGalleryImage {
        NewGalleryImage {
            title: "Muddy SUV rescue".to_string(),
            description: Some("Full detail on a trail rig".to_string()),
            category: "suvs".to_string(),
            is_featured: false,
            display_order: 1,
            before: upload("before.jpg"),
            after: upload("after.jpg"),
        }
    }

    struct Fixture {
        service: GalleryService,
        store: Arc<MemoryObjectStore>,
        queue: CleanupQueue,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryObjectStore::new());
        let queue = CleanupQueue::new();
        let service = GalleryService::new(
            Arc::new(InMemoryStorage::empty()),
            store.clone(),
            queue.clone(),
            create_event_bus(),
        );
        Fixture {
            service,
            store,
            queue,
        }
    }

    #[tokio::test]
    async fn publish_stores_both_blobs_and_the_row() {
        let f = fixture();
        let image = f.service.publish(new_image()).await.unwrap();

        assert!(image.is_active);
        assert!(f.store.exists(&image.before_path).await.unwrap());
        assert!(f.store.exists(&image.after_path).await.unwrap());
        assert_eq!(f.service.list_public().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_after_upload_rolls_back_the_before_blob() {
        let f = fixture();
        f.store.fail_puts_containing("/after/");

        let err = f.service.publish(new_image()).await.unwrap_err();
        assert!(matches!(err, DomainError::ObjectStore(_)));
        // Nothing left behind
        assert_eq!(f.store.object_count(), 0);
        assert!(f.queue.is_empty());
        assert!(f.service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_rollback_lands_on_the_cleanup_queue() {
        let f = fixture();
        f.store.fail_puts_containing("/after/");
        f.store.fail_deletes_containing("/before/");

        f.service.publish(new_image()).await.unwrap_err();
        // The before blob could not be rolled back, so the worker owns it now
        assert_eq!(f.queue.len(), 1);
        assert_eq!(f.store.object_count(), 1);
    }

    #[tokio::test]
    async fn delete_removes_row_first_then_blobs() {
        let f = fixture();
        let image = f.service.publish(new_image()).await.unwrap();

        f.service.delete(&image.id).await.unwrap();
        assert!(f.service.list_all().await.unwrap().is_empty());
        assert_eq!(f.store.object_count(), 0);
    }

    #[tokio::test]
    async fn delete_with_stuck_blobs_queues_them() {
        let f = fixture();
        let image = f.service.publish(new_image()).await.unwrap();
        f.store.fail_deletes_containing("suvs/");

        // The row is gone even though the blobs are stuck
        f.service.delete(&image.id).await.unwrap();
        assert!(f.service.list_all().await.unwrap().is_empty());
        assert_eq!(f.queue.len(), 2);
    }

    #[tokio::test]
    async fn hidden_entries_are_not_public() {
        let f = fixture();
        let image = f.service.publish(new_image()).await.unwrap();

        f.service
            .update(
                &image.id,
                GalleryImageUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(f.service.list_public().await.unwrap().is_empty());
        assert_eq!(f.service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_rejects_blank_title() {
        let f = fixture();
        let image = f.service.publish(new_image()).await.unwrap();
        let err = f
            .service
            .update(
                &image.id,
                GalleryImageUpdate {
                    title: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn publish_rejects_missing_files() {
        let f = fixture();
        let mut input = new_image();
        input.after.bytes.clear();
        let err = f.service.publish(input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let f = fixture();
        let err = f.service.delete("nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
