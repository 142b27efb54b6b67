//! Application services

mod booking;
mod gallery;
mod subscription;
mod upload_cleanup;

pub use booking::{BookingService, StepValidation, SubmissionOutcome};
pub use gallery::{GalleryImageUpdate, GalleryService};
pub use subscription::{EnrollmentRequest, PlanInput, SubscriptionService};
pub use upload_cleanup::{CleanupQueue, UploadCleanupWorker};
