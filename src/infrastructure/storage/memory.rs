//! In-memory storage implementation

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    default_home_content, default_plans, Booking, BookingFilter, BookingStatus, ContactStatus,
    ContactSubmission, CustomerSubscription, DomainError, DomainResult, GalleryImage, HomeContent,
    Page, Storage, SubscriptionPlan, SubscriptionStatus,
};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    bookings: DashMap<String, Booking>,
    contacts: DashMap<String, ContactSubmission>,
    gallery_images: DashMap<String, GalleryImage>,
    plans: DashMap<String, SubscriptionPlan>,
    subscriptions: DashMap<String, CustomerSubscription>,
    content: DashMap<String, HomeContent>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        let storage = Self::empty();

        // Seed the stock plans and starter copy so the API works out of the box
        for plan in default_plans() {
            storage.plans.insert(plan.id.clone(), plan);
        }
        for section in default_home_content() {
            storage.content.insert(section.section.clone(), section);
        }

        storage
    }

    /// Empty storage without any seeded records
    pub fn empty() -> Self {
        Self {
            bookings: DashMap::new(),
            contacts: DashMap::new(),
            gallery_images: DashMap::new(),
            plans: DashMap::new(),
            subscriptions: DashMap::new(),
            content: DashMap::new(),
        }
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Slice a newest-first collection into a 1-based page
fn paginate<T>(mut items: Vec<T>, page: u32, limit: u32) -> Page<T> {
    let total = items.len() as u64;
    let page = page.max(1);
    let limit = limit.clamp(1, 100);
    let offset = ((page - 1) * limit) as usize;
    let items = if offset >= items.len() {
        Vec::new()
    } else {
        items.drain(offset..).take(limit as usize).collect()
    };
    (items, total)
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_booking(&self, booking: Booking) -> DomainResult<Booking> {
        let duplicate = self
            .bookings
            .iter()
            .any(|b| b.value().submission_key == booking.submission_key);
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "booking with submission key '{}'",
                booking.submission_key
            )));
        }
        self.bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn get_booking(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|b| b.clone()))
    }

    async fn find_booking_by_submission_key(
        &self,
        submission_key: &str,
    ) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .find(|b| b.value().submission_key == submission_key)
            .map(|b| b.value().clone()))
    }

    async fn list_bookings(
        &self,
        filter: BookingFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| {
                filter.status.map_or(true, |s| b.value().status == s)
                    && filter
                        .preferred_date
                        .map_or(true, |d| b.value().preferred_date == d)
            })
            .map(|b| b.value().clone())
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(bookings, page, limit))
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> DomainResult<Booking> {
        if let Some(mut booking) = self.bookings.get_mut(id) {
            booking.status = status;
            booking.updated_at = Utc::now();
            Ok(booking.clone())
        } else {
            Err(DomainError::not_found("booking", id))
        }
    }

    async fn count_bookings(&self, status: Option<BookingStatus>) -> DomainResult<u64> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| status.map_or(true, |s| b.value().status == s))
            .count() as u64)
    }

    async fn save_contact(&self, contact: ContactSubmission) -> DomainResult<ContactSubmission> {
        self.contacts.insert(contact.id.clone(), contact.clone());
        Ok(contact)
    }

    async fn get_contact(&self, id: &str) -> DomainResult<Option<ContactSubmission>> {
        Ok(self.contacts.get(id).map(|c| c.clone()))
    }

    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<ContactSubmission>> {
        let mut contacts: Vec<ContactSubmission> = self
            .contacts
            .iter()
            .filter(|c| status.map_or(true, |s| c.value().status == s))
            .map(|c| c.value().clone())
            .collect();
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(contacts, page, limit))
    }

    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> DomainResult<ContactSubmission> {
        if let Some(mut contact) = self.contacts.get_mut(id) {
            contact.status = status;
            contact.updated_at = Utc::now();
            Ok(contact.clone())
        } else {
            Err(DomainError::not_found("contact submission", id))
        }
    }

    async fn count_contacts(&self, status: Option<ContactStatus>) -> DomainResult<u64> {
        Ok(self
            .contacts
            .iter()
            .filter(|c| status.map_or(true, |s| c.value().status == s))
            .count() as u64)
    }

    async fn save_gallery_image(&self, image: GalleryImage) -> DomainResult<()> {
        self.gallery_images.insert(image.id.clone(), image);
        Ok(())
    }

    async fn get_gallery_image(&self, id: &str) -> DomainResult<Option<GalleryImage>> {
        Ok(self.gallery_images.get(id).map(|img| img.clone()))
    }

    async fn list_gallery_images(&self, only_active: bool) -> DomainResult<Vec<GalleryImage>> {
        let mut images: Vec<GalleryImage> = self
            .gallery_images
            .iter()
            .filter(|img| !only_active || img.value().is_active)
            .map(|img| img.value().clone())
            .collect();
        images.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(images)
    }

    async fn update_gallery_image(&self, image: GalleryImage) -> DomainResult<()> {
        if !self.gallery_images.contains_key(&image.id) {
            return Err(DomainError::not_found("gallery image", image.id));
        }
        self.gallery_images.insert(image.id.clone(), image);
        Ok(())
    }

    async fn delete_gallery_image(&self, id: &str) -> DomainResult<Option<GalleryImage>> {
        Ok(self.gallery_images.remove(id).map(|(_, image)| image))
    }

    async fn count_gallery_images(&self, only_active: bool) -> DomainResult<u64> {
        Ok(self
            .gallery_images
            .iter()
            .filter(|img| !only_active || img.value().is_active)
            .count() as u64)
    }

    async fn get_plan(&self, id: &str) -> DomainResult<Option<SubscriptionPlan>> {
        Ok(self.plans.get(id).map(|p| p.clone()))
    }

    async fn list_plans(&self, only_active: bool) -> DomainResult<Vec<SubscriptionPlan>> {
        let mut plans: Vec<SubscriptionPlan> = self
            .plans
            .iter()
            .filter(|p| !only_active || p.value().is_active)
            .map(|p| p.value().clone())
            .collect();
        plans.sort_by_key(|p| p.sort_order);
        Ok(plans)
    }

    async fn save_plan(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan> {
        let duplicate = self
            .plans
            .iter()
            .any(|p| p.value().slug == plan.slug && p.key() != &plan.id);
        if duplicate {
            return Err(DomainError::Conflict(format!("plan slug '{}'", plan.slug)));
        }
        self.plans.insert(plan.id.clone(), plan.clone());
        Ok(plan)
    }

    async fn update_plan(&self, plan: SubscriptionPlan) -> DomainResult<()> {
        if !self.plans.contains_key(&plan.id) {
            return Err(DomainError::not_found("plan", plan.id));
        }
        let duplicate = self
            .plans
            .iter()
            .any(|p| p.value().slug == plan.slug && p.key() != &plan.id);
        if duplicate {
            return Err(DomainError::Conflict(format!("plan slug '{}'", plan.slug)));
        }
        self.plans.insert(plan.id.clone(), plan);
        Ok(())
    }

    async fn save_subscription(&self, subscription: CustomerSubscription) -> DomainResult<()> {
        self.subscriptions
            .insert(subscription.id.clone(), subscription);
        Ok(())
    }

    async fn get_subscription(&self, id: &str) -> DomainResult<Option<CustomerSubscription>> {
        Ok(self.subscriptions.get(id).map(|s| s.clone()))
    }

    async fn list_subscriptions(
        &self,
        status: Option<SubscriptionStatus>,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<CustomerSubscription>> {
        let mut subscriptions: Vec<CustomerSubscription> = self
            .subscriptions
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.value().status == wanted))
            .map(|s| s.value().clone())
            .collect();
        subscriptions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(subscriptions, page, limit))
    }

    async fn update_subscription_status(
        &self,
        id: &str,
        status: SubscriptionStatus,
    ) -> DomainResult<CustomerSubscription> {
        if let Some(mut subscription) = self.subscriptions.get_mut(id) {
            subscription.status = status;
            subscription.updated_at = Utc::now();
            Ok(subscription.clone())
        } else {
            Err(DomainError::not_found("subscription", id))
        }
    }

    async fn count_subscriptions(&self, status: Option<SubscriptionStatus>) -> DomainResult<u64> {
        Ok(self
            .subscriptions
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.value().status == wanted))
            .count() as u64)
    }

    async fn get_content(&self, section: &str) -> DomainResult<Option<HomeContent>> {
        Ok(self.content.get(section).map(|c| c.clone()))
    }

    async fn list_content(&self) -> DomainResult<Vec<HomeContent>> {
        let mut sections: Vec<HomeContent> =
            self.content.iter().map(|c| c.value().clone()).collect();
        sections.sort_by_key(|c| c.sort_order);
        Ok(sections)
    }

    async fn upsert_content(&self, content: HomeContent) -> DomainResult<HomeContent> {
        self.content
            .insert(content.section.clone(), content.clone());
        Ok(content)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingDraft, ServiceLocation};
    use chrono::NaiveDate;

    fn sample_booking(submission_key: &str) -> Booking {
        let draft = BookingDraft {
            first_name: "Dana".into(),
            last_name: "Reyes".into(),
            email: "dana@example.com".into(),
            phone: "555-0142".into(),
            vehicle_type: "suv".into(),
            vehicle_year: "2021".into(),
            vehicle_make: "Subaru".into(),
            vehicle_model: "Outback".into(),
            service_id: Some("full-detail".into()),
            add_on_ids: vec![],
            location: ServiceLocation::Shop,
            address: String::new(),
            preferred_date: NaiveDate::from_ymd_opt(2025, 6, 14),
            time_slot: "09:00".into(),
        };
        Booking::from_draft(draft, submission_key, 150)
    }

    #[tokio::test]
    async fn bookings_round_trip_by_id_and_key() {
        let storage = InMemoryStorage::new();
        let saved = storage.save_booking(sample_booking("key-0001")).await.unwrap();

        let by_id = storage.get_booking(&saved.id).await.unwrap();
        assert!(by_id.is_some());

        let by_key = storage
            .find_booking_by_submission_key("key-0001")
            .await
            .unwrap();
        assert_eq!(by_key.map(|b| b.id), Some(saved.id));
    }

    #[tokio::test]
    async fn duplicate_submission_keys_are_rejected() {
        let storage = InMemoryStorage::new();
        storage.save_booking(sample_booking("key-0001")).await.unwrap();
        let err = storage
            .save_booking(sample_booking("key-0001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(storage.booking_count(), 1);
    }

    #[tokio::test]
    async fn status_update_returns_the_updated_record() {
        let storage = InMemoryStorage::new();
        let saved = storage.save_booking(sample_booking("key-0001")).await.unwrap();
        let updated = storage
            .update_booking_status(&saved.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn status_update_for_missing_booking_fails() {
        let storage = InMemoryStorage::new();
        let err = storage
            .update_booking_status("missing", BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn booking_list_filters_by_status() {
        let storage = InMemoryStorage::new();
        let first = storage.save_booking(sample_booking("key-0001")).await.unwrap();
        storage.save_booking(sample_booking("key-0002")).await.unwrap();
        storage
            .update_booking_status(&first.id, BookingStatus::Confirmed)
            .await
            .unwrap();

        let filter = BookingFilter {
            status: Some(BookingStatus::Confirmed),
            preferred_date: None,
        };
        let (items, total) = storage.list_bookings(filter, 1, 50).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id, first.id);

        let (all, total) = storage
            .list_bookings(BookingFilter::default(), 1, 50)
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn booking_pages_slice_without_losing_the_total() {
        let storage = InMemoryStorage::new();
        for i in 0..5 {
            storage
                .save_booking(sample_booking(&format!("key-{:04}", i)))
                .await
                .unwrap();
        }

        let (first_page, total) = storage
            .list_bookings(BookingFilter::default(), 1, 2)
            .await
            .unwrap();
        assert_eq!(total, 5);
        assert_eq!(first_page.len(), 2);

        let (last_page, _) = storage
            .list_bookings(BookingFilter::default(), 3, 2)
            .await
            .unwrap();
        assert_eq!(last_page.len(), 1);

        let (past_the_end, _) = storage
            .list_bookings(BookingFilter::default(), 9, 2)
            .await
            .unwrap();
        assert!(past_the_end.is_empty());
    }

    #[tokio::test]
    async fn contacts_round_trip_and_count_by_status() {
        let storage = InMemoryStorage::new();
        let saved = storage
            .save_contact(ContactSubmission::new("Riley", "riley@example.com", "Quote please"))
            .await
            .unwrap();

        let fetched = storage.get_contact(&saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ContactStatus::New);

        let updated = storage
            .update_contact_status(&saved.id, ContactStatus::Resolved)
            .await
            .unwrap();
        assert_eq!(updated.status, ContactStatus::Resolved);

        assert_eq!(storage.count_contacts(None).await.unwrap(), 1);
        assert_eq!(
            storage
                .count_contacts(Some(ContactStatus::Resolved))
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            storage.count_contacts(Some(ContactStatus::New)).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn stock_plans_are_seeded() {
        let storage = InMemoryStorage::new();
        let plans = storage.list_plans(true).await.unwrap();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].slug, "shine-club");
    }

    #[tokio::test]
    async fn inactive_plans_are_hidden_from_the_active_list() {
        let storage = InMemoryStorage::new();
        let mut plan = storage.list_plans(true).await.unwrap().remove(0);
        plan.is_active = false;
        storage.update_plan(plan).await.unwrap();
        assert_eq!(storage.list_plans(true).await.unwrap().len(), 2);
        assert_eq!(storage.list_plans(false).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn gallery_listing_respects_active_flag_and_order() {
        let storage = InMemoryStorage::empty();
        let image = |id: &str, order: i32, active: bool| GalleryImage {
            id: id.into(),
            title: format!("Job {}", id),
            description: None,
            category: "sedans".into(),
            before_url: "/uploads/a".into(),
            after_url: "/uploads/b".into(),
            before_path: "a".into(),
            after_path: "b".into(),
            is_featured: false,
            display_order: order,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        storage.save_gallery_image(image("one", 2, true)).await.unwrap();
        storage.save_gallery_image(image("two", 1, true)).await.unwrap();
        storage.save_gallery_image(image("three", 0, false)).await.unwrap();

        let public = storage.list_gallery_images(true).await.unwrap();
        assert_eq!(public.len(), 2);
        assert_eq!(public[0].id, "two");

        let all = storage.list_gallery_images(false).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(storage.count_gallery_images(true).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn deleting_a_gallery_image_returns_the_removed_row() {
        let storage = InMemoryStorage::empty();
        let image = GalleryImage {
            id: "one".into(),
            title: "Job one".into(),
            description: None,
            category: "sedans".into(),
            before_url: "/uploads/a".into(),
            after_url: "/uploads/b".into(),
            before_path: "a".into(),
            after_path: "b".into(),
            is_featured: false,
            display_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        storage.save_gallery_image(image).await.unwrap();

        let removed = storage.delete_gallery_image("one").await.unwrap();
        assert_eq!(removed.map(|img| img.before_path), Some("a".to_string()));
        assert!(storage.delete_gallery_image("one").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_plan_slugs_are_rejected() {
        let storage = InMemoryStorage::new();
        let mut plan = storage.list_plans(true).await.unwrap().remove(0);
        plan.id = "different-id".into();
        let err = storage.save_plan(plan).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn content_sections_are_seeded_and_upsertable() {
        let storage = InMemoryStorage::new();
        let sections = storage.list_content().await.unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].section, "hero");

        let mut hero = storage.get_content("hero").await.unwrap().unwrap();
        hero.title = "New headline".into();
        storage.upsert_content(hero).await.unwrap();
        assert_eq!(
            storage.get_content("hero").await.unwrap().unwrap().title,
            "New headline"
        );

        // Upsert of a brand new section inserts it
        let extra = HomeContent {
            section: "faq".into(),
            title: "FAQ".into(),
            subtitle: None,
            body: None,
            image_url: None,
            sort_order: 9,
            updated_at: Utc::now(),
        };
        storage.upsert_content(extra).await.unwrap();
        assert_eq!(storage.list_content().await.unwrap().len(), 4);
    }
}
