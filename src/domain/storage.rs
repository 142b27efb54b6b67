//! Storage trait definitions

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    Booking, BookingStatus, ContactStatus, ContactSubmission, CustomerSubscription, DomainResult,
    GalleryImage, HomeContent, SubscriptionPlan, SubscriptionStatus,
};

/// Filters for the admin booking list
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub preferred_date: Option<NaiveDate>,
}

/// A page of records plus the unfiltered-by-paging total
pub type Page<T> = (Vec<T>, u64);

/// Storage trait for persistence operations
#[async_trait]
pub trait Storage: Send + Sync {
    // Booking operations
    async fn save_booking(&self, booking: Booking) -> DomainResult<Booking>;
    async fn get_booking(&self, id: &str) -> DomainResult<Option<Booking>>;
    async fn find_booking_by_submission_key(
        &self,
        submission_key: &str,
    ) -> DomainResult<Option<Booking>>;
    /// Newest first, filtered, paginated (`page` is 1-based)
    async fn list_bookings(
        &self,
        filter: BookingFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<Booking>>;
    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> DomainResult<Booking>;
    async fn count_bookings(&self, status: Option<BookingStatus>) -> DomainResult<u64>;

    // Contact submission operations
    async fn save_contact(&self, contact: ContactSubmission) -> DomainResult<ContactSubmission>;
    async fn get_contact(&self, id: &str) -> DomainResult<Option<ContactSubmission>>;
    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<ContactSubmission>>;
    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> DomainResult<ContactSubmission>;
    async fn count_contacts(&self, status: Option<ContactStatus>) -> DomainResult<u64>;

    // Gallery operations
    async fn save_gallery_image(&self, image: GalleryImage) -> DomainResult<()>;
    async fn get_gallery_image(&self, id: &str) -> DomainResult<Option<GalleryImage>>;
    async fn list_gallery_images(&self, only_active: bool) -> DomainResult<Vec<GalleryImage>>;
    async fn update_gallery_image(&self, image: GalleryImage) -> DomainResult<()>;
    /// Remove a gallery row and hand back the removed record so its objects
    /// can be deleted afterwards
    async fn delete_gallery_image(&self, id: &str) -> DomainResult<Option<GalleryImage>>;
    async fn count_gallery_images(&self, only_active: bool) -> DomainResult<u64>;

    // Subscription plan operations
    async fn get_plan(&self, id: &str) -> DomainResult<Option<SubscriptionPlan>>;
    async fn list_plans(&self, only_active: bool) -> DomainResult<Vec<SubscriptionPlan>>;
    async fn save_plan(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan>;
    async fn update_plan(&self, plan: SubscriptionPlan) -> DomainResult<()>;

    // Customer subscription operations
    async fn save_subscription(&self, subscription: CustomerSubscription) -> DomainResult<()>;
    async fn get_subscription(&self, id: &str) -> DomainResult<Option<CustomerSubscription>>;
    async fn list_subscriptions(
        &self,
        status: Option<SubscriptionStatus>,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<CustomerSubscription>>;
    async fn update_subscription_status(
        &self,
        id: &str,
        status: SubscriptionStatus,
    ) -> DomainResult<CustomerSubscription>;
    async fn count_subscriptions(&self, status: Option<SubscriptionStatus>) -> DomainResult<u64>;

    // Home content operations
    async fn get_content(&self, section: &str) -> DomainResult<Option<HomeContent>>;
    async fn list_content(&self) -> DomainResult<Vec<HomeContent>>;
    /// Insert or replace the section named by `content.section`
    async fn upsert_content(&self, content: HomeContent) -> DomainResult<HomeContent>;
}
