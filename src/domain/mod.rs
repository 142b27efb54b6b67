//! Domain layer: entities, value objects and storage contracts

pub mod booking;
pub mod contact;
pub mod content;
pub mod error;
pub mod gallery;
pub mod pricing;
pub mod storage;
pub mod subscription;

// Re-export commonly used types
pub use booking::{Booking, BookingDraft, BookingStatus, BookingStep};
pub use contact::{ContactStatus, ContactSubmission};
pub use content::{default_home_content, HomeContent};
pub use error::{DomainError, DomainResult};
pub use gallery::{GalleryImage, ImageKind, NewGalleryImage, UploadFile};
pub use pricing::{
    AddOn, PricingCatalog, Quote, QuoteLine, ServiceLocation, ServiceOffering, MOBILE_SURCHARGE,
};
pub use storage::{BookingFilter, Page, Storage};
pub use subscription::{
    default_plans, BillingCadence, CustomerSubscription, SubscriptionPlan, SubscriptionStatus,
};
