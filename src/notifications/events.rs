//! Notification events
//!
//! Defines all event types that can be broadcasted to WebSocket clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// New booking submitted through the wizard
    BookingReceived(BookingReceivedEvent),
    /// Admin changed a booking status
    BookingStatusChanged(BookingStatusChangedEvent),
    /// New contact form submission
    ContactReceived(ContactReceivedEvent),
    /// Admin changed a contact submission status
    ContactStatusChanged(ContactStatusChangedEvent),
    /// Customer enrolled in a subscription plan
    SubscriptionCreated(SubscriptionCreatedEvent),
    /// Admin changed a subscription status
    SubscriptionStatusChanged(SubscriptionStatusChangedEvent),
    /// A before/after pair finished uploading
    GalleryImagePublished(GalleryImagePublishedEvent),
    /// Gallery image removed
    GalleryImageDeleted(GalleryImageDeletedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BookingReceived(_) => "booking_received",
            Event::BookingStatusChanged(_) => "booking_status_changed",
            Event::ContactReceived(_) => "contact_received",
            Event::ContactStatusChanged(_) => "contact_status_changed",
            Event::SubscriptionCreated(_) => "subscription_created",
            Event::SubscriptionStatusChanged(_) => "subscription_status_changed",
            Event::GalleryImagePublished(_) => "gallery_image_published",
            Event::GalleryImageDeleted(_) => "gallery_image_deleted",
        }
    }
}

/// Booking received event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReceivedEvent {
    pub booking_id: String,
    pub reference_code: String,
    pub customer_name: String,
    pub service_id: String,
    pub preferred_date: NaiveDate,
    pub total_price: i64,
    pub timestamp: DateTime<Utc>,
}

/// Booking status changed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusChangedEvent {
    pub booking_id: String,
    pub reference_code: String,
    pub old_status: String,
    pub new_status: String,
    pub timestamp: DateTime<Utc>,
}

/// Contact received event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceivedEvent {
    pub contact_id: String,
    pub name: String,
    pub subject: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Contact status changed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStatusChangedEvent {
    pub contact_id: String,
    pub old_status: String,
    pub new_status: String,
    pub timestamp: DateTime<Utc>,
}

/// Subscription created event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCreatedEvent {
    pub subscription_id: String,
    pub plan_slug: String,
    pub customer_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Subscription status changed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionStatusChangedEvent {
    pub subscription_id: String,
    pub old_status: String,
    pub new_status: String,
    pub timestamp: DateTime<Utc>,
}

/// Gallery image published event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImagePublishedEvent {
    pub image_id: String,
    pub title: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

/// Gallery image deleted event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImageDeletedEvent {
    pub image_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
