//! Booking Service
//!
//! Runs the wizard guards, prices the selection server-side and persists
//! submissions exactly once per submission key.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};

use crate::domain::{
    Booking, BookingDraft, BookingFilter, BookingStatus, BookingStep, DomainError, DomainResult,
    Page, PricingCatalog, Quote, Storage,
};
use crate::notifications::{
    BookingReceivedEvent, BookingStatusChangedEvent, Event, SharedEventBus,
};

/// Outcome of a submission attempt
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub booking: Booking,
    /// False when the submission key matched an earlier booking
    pub created: bool,
}

/// Validation result for a single wizard step
#[derive(Debug, Clone)]
pub struct StepValidation {
    pub step: BookingStep,
    pub valid: bool,
    pub missing_fields: Vec<&'static str>,
}

/// Booking Service
///
/// Owns everything between the public wizard and the bookings table.
pub struct BookingService {
    storage: Arc<dyn Storage>,
    catalog: PricingCatalog,
    event_bus: SharedEventBus,
}

impl BookingService {
    pub fn new(storage: Arc<dyn Storage>, event_bus: SharedEventBus) -> Self {
        Self {
            storage,
            catalog: PricingCatalog::standard(),
            event_bus,
        }
    }

    pub fn catalog(&self) -> &PricingCatalog {
        &self.catalog
    }

    /// Price a selection without persisting anything
    pub fn quote(&self, draft: &BookingDraft) -> Quote {
        self.catalog.quote(
            draft.service_id.as_deref().unwrap_or(""),
            &draft.add_on_ids,
            draft.location,
        )
    }

    /// Validate a single wizard step
    pub fn validate_step(&self, draft: &BookingDraft, step: u8) -> DomainResult<StepValidation> {
        let step = BookingStep::from_number(step)
            .ok_or_else(|| DomainError::Validation(format!("unknown wizard step {}", step)))?;
        let missing = draft.missing_fields(step);
        Ok(StepValidation {
            step,
            valid: missing.is_empty(),
            missing_fields: missing,
        })
    }

    /// Submit a completed wizard draft.
    ///
    /// Every step guard is re-run server-side and the price is recomputed
    /// from the catalog, so nothing the client sends is trusted. Retries
    /// with the same submission key return the stored booking unchanged.
    pub async fn submit(
        &self,
        draft: BookingDraft,
        submission_key: &str,
    ) -> DomainResult<SubmissionOutcome> {
        if submission_key.trim().is_empty() {
            return Err(DomainError::Validation(
                "submission_key must not be empty".to_string(),
            ));
        }

        if let Some(existing) = self
            .storage
            .find_booking_by_submission_key(submission_key)
            .await?
        {
            info!(
                "Duplicate submission key {}, returning booking {}",
                submission_key, existing.reference_code
            );
            return Ok(SubmissionOutcome {
                booking: existing,
                created: false,
            });
        }

        let missing = draft.missing_for_submit();
        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let quote = self.quote(&draft);
        let booking = Booking::from_draft(draft, submission_key, quote.total);

        let booking = match self.storage.save_booking(booking).await {
            Ok(saved) => saved,
            // Two requests raced on the same key; the row that won is the
            // canonical booking for both callers.
            Err(DomainError::Conflict(_)) => {
                let existing = self
                    .storage
                    .find_booking_by_submission_key(submission_key)
                    .await?
                    .ok_or_else(|| {
                        DomainError::Storage(
                            "booking conflict without a stored booking".to_string(),
                        )
                    })?;
                warn!(
                    "Submission key {} raced, returning booking {}",
                    submission_key, existing.reference_code
                );
                return Ok(SubmissionOutcome {
                    booking: existing,
                    created: false,
                });
            }
            Err(e) => return Err(e),
        };

        info!(
            "Booking {} submitted: {} on {}, ${}",
            booking.reference_code, booking.service_id, booking.preferred_date, booking.total_price
        );
        metrics::counter!("bookings_submitted_total").increment(1);

        self.event_bus
            .publish(Event::BookingReceived(BookingReceivedEvent {
                booking_id: booking.id.clone(),
                reference_code: booking.reference_code.clone(),
                customer_name: format!("{} {}", booking.first_name, booking.last_name),
                service_id: booking.service_id.clone(),
                preferred_date: booking.preferred_date,
                total_price: booking.total_price,
                timestamp: Utc::now(),
            }));

        Ok(SubmissionOutcome {
            booking,
            created: true,
        })
    }

    pub async fn get(&self, id: &str) -> DomainResult<Booking> {
        self.storage
            .get_booking(id)
            .await?
            .ok_or_else(|| DomainError::not_found("booking", id))
    }

    pub async fn list(
        &self,
        filter: BookingFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<Booking>> {
        self.storage.list_bookings(filter, page, limit).await
    }

    /// Set a booking status. Any status can move to any other status, so a
    /// cancelled job can be reopened after a phone call.
    pub async fn update_status(&self, id: &str, status: BookingStatus) -> DomainResult<Booking> {
        let before = self.get(id).await?;
        let updated = self.storage.update_booking_status(id, status).await?;

        if before.status != updated.status {
            info!(
                "Booking {} status: {} -> {}",
                updated.reference_code, before.status, updated.status
            );
            self.event_bus
                .publish(Event::BookingStatusChanged(BookingStatusChangedEvent {
                    booking_id: updated.id.clone(),
                    reference_code: updated.reference_code.clone(),
                    old_status: before.status.to_string(),
                    new_status: updated.status.to_string(),
                    timestamp: Utc::now(),
                }));
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceLocation;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::notifications::create_event_bus;
    use chrono::NaiveDate;

    fn service() -> BookingService {
        BookingService::new(Arc::new(InMemoryStorage::empty()), create_event_bus())
    }

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            first_name: "Dana".into(),
            last_name: "Reyes".into(),
            email: "dana@example.com".into(),
            phone: "555-0142".into(),
            vehicle_type: "suv".into(),
            vehicle_year: "2021".into(),
            vehicle_make: "Subaru".into(),
            vehicle_model: "Outback".into(),
            service_id: Some("full-detail".into()),
            add_on_ids: vec!["ceramic-coating".into(), "engine-bay".into()],
            location: ServiceLocation::Mobile,
            address: "42 Harbor Ln".into(),
            preferred_date: NaiveDate::from_ymd_opt(2025, 6, 14),
            time_slot: "09:00".into(),
        }
    }

    #[tokio::test]
    async fn submit_prices_server_side() {
        let svc = service();
        let outcome = svc.submit(complete_draft(), "key-1").await.unwrap();
        assert!(outcome.created);
        // 150 base + 100 ceramic + 50 engine bay + 25 mobile surcharge
        assert_eq!(outcome.booking.total_price, 325);
        assert_eq!(outcome.booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn duplicate_submission_key_returns_stored_booking() {
        let svc = service();
        let first = svc.submit(complete_draft(), "key-1").await.unwrap();

        let mut retry = complete_draft();
        retry.first_name = "Changed".into();
        let second = svc.submit(retry, "key-1").await.unwrap();

        assert!(!second.created);
        assert_eq!(second.booking.id, first.booking.id);
        assert_eq!(second.booking.first_name, "Dana");

        let (all, total) = svc.list(BookingFilter::default(), 1, 50).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn incomplete_draft_is_rejected() {
        let svc = service();
        let mut draft = complete_draft();
        draft.email = String::new();
        let err = svc.submit(draft, "key-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_submission_key_is_rejected() {
        let svc = service();
        let err = svc.submit(complete_draft(), "  ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn validate_step_reports_missing_fields() {
        let svc = service();
        let mut draft = complete_draft();
        draft.phone = String::new();
        let result = svc.validate_step(&draft, 1).unwrap();
        assert!(!result.valid);
        assert_eq!(result.missing_fields, vec!["phone"]);

        assert!(svc.validate_step(&draft, 2).unwrap().valid);
        assert!(svc.validate_step(&draft, 9).is_err());
    }

    #[tokio::test]
    async fn any_status_transition_is_allowed() {
        let svc = service();
        let outcome = svc.submit(complete_draft(), "key-1").await.unwrap();
        let id = outcome.booking.id;

        let b = svc.update_status(&id, BookingStatus::Cancelled).await.unwrap();
        assert_eq!(b.status, BookingStatus::Cancelled);

        // Reopening a cancelled booking is fine
        let b = svc.update_status(&id, BookingStatus::Confirmed).await.unwrap();
        assert_eq!(b.status, BookingStatus::Confirmed);

        let b = svc.update_status(&id, BookingStatus::Completed).await.unwrap();
        assert_eq!(b.status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn status_change_publishes_an_event() {
        let bus = create_event_bus();
        let svc = BookingService::new(Arc::new(InMemoryStorage::empty()), bus.clone());
        let outcome = svc.submit(complete_draft(), "key-1").await.unwrap();

        let mut subscriber = bus.subscribe();
        svc.update_status(&outcome.booking.id, BookingStatus::Confirmed)
            .await
            .unwrap();

        let msg = tokio::time::timeout(std::time::Duration::from_millis(100), subscriber.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(msg.event.event_type(), "booking_status_changed");
    }

    #[tokio::test]
    async fn unknown_ids_still_submit_with_partial_price() {
        let svc = service();
        let mut draft = complete_draft();
        draft.service_id = Some("gold-plating".into());
        draft.add_on_ids = vec!["unknown-extra".into()];
        draft.location = ServiceLocation::Shop;
        draft.address = String::new();

        let outcome = svc.submit(draft, "key-1").await.unwrap();
        assert_eq!(outcome.booking.total_price, 0);
    }
}
