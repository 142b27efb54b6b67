pub mod services;

// Re-export key types for convenience
pub use services::{
    BookingService, CleanupQueue, EnrollmentRequest, GalleryImageUpdate, GalleryService,
    PlanInput, StepValidation, SubmissionOutcome, SubscriptionService, UploadCleanupWorker,
};
