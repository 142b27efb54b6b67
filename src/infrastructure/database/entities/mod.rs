//! Database entities module

pub mod booking;
pub mod contact_submission;
pub mod customer_subscription;
pub mod gallery_image;
pub mod home_content;
pub mod subscription_plan;

pub use booking::Entity as Booking;
pub use contact_submission::Entity as ContactSubmission;
pub use customer_subscription::Entity as CustomerSubscription;
pub use gallery_image::Entity as GalleryImage;
pub use home_content::Entity as HomeContent;
pub use subscription_plan::Entity as SubscriptionPlan;
