//! Booking domain entity and the four-step booking wizard

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pricing::ServiceLocation;

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl BookingStatus {
    /// Parse an admin-supplied status string. Unknown values return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// The four steps of the booking wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    PersonalInfo,
    VehicleInfo,
    ServiceSelection,
    Schedule,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        Self::PersonalInfo,
        Self::VehicleInfo,
        Self::ServiceSelection,
        Self::Schedule,
    ];

    pub fn from_number(step: u8) -> Option<Self> {
        match step {
            1 => Some(Self::PersonalInfo),
            2 => Some(Self::VehicleInfo),
            3 => Some(Self::ServiceSelection),
            4 => Some(Self::Schedule),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::VehicleInfo => 2,
            Self::ServiceSelection => 3,
            Self::Schedule => 4,
        }
    }

    /// Next step, or `None` on the last step
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Previous step, or `None` on the first step. Going backward never
    /// requires validation.
    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::PersonalInfo => None,
            other => Self::from_number(other.number() - 1),
        }
    }
}

impl std::fmt::Display for BookingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonalInfo => write!(f, "personal_info"),
            Self::VehicleInfo => write!(f, "vehicle_info"),
            Self::ServiceSelection => write!(f, "service_selection"),
            Self::Schedule => write!(f, "schedule"),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Customer input collected across the booking wizard.
///
/// Every field defaults to empty so a partially filled wizard state can be
/// validated step by step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: String,
    pub vehicle_year: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub service_id: Option<String>,
    pub add_on_ids: Vec<String>,
    pub location: ServiceLocation,
    pub address: String,
    pub preferred_date: Option<NaiveDate>,
    pub time_slot: String,
}

impl BookingDraft {
    /// Fields still missing for the given wizard step.
    ///
    /// Whitespace-only input counts as missing.
    pub fn missing_fields(&self, step: BookingStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            BookingStep::PersonalInfo => {
                if is_blank(&self.first_name) {
                    missing.push("first_name");
                }
                if is_blank(&self.last_name) {
                    missing.push("last_name");
                }
                if is_blank(&self.email) {
                    missing.push("email");
                }
                if is_blank(&self.phone) {
                    missing.push("phone");
                }
            }
            BookingStep::VehicleInfo => {
                if is_blank(&self.vehicle_type) {
                    missing.push("vehicle_type");
                }
                if is_blank(&self.vehicle_year) {
                    missing.push("vehicle_year");
                }
                if is_blank(&self.vehicle_make) {
                    missing.push("vehicle_make");
                }
                if is_blank(&self.vehicle_model) {
                    missing.push("vehicle_model");
                }
            }
            BookingStep::ServiceSelection => {
                if self.service_id.as_deref().map(is_blank).unwrap_or(true) {
                    missing.push("service_id");
                }
                if self.location.requires_address() && is_blank(&self.address) {
                    missing.push("address");
                }
            }
            BookingStep::Schedule => {
                if self.preferred_date.is_none() {
                    missing.push("preferred_date");
                }
                if is_blank(&self.time_slot) {
                    missing.push("time_slot");
                }
            }
        }
        missing
    }

    /// Whether the wizard may advance past the given step
    pub fn can_advance(&self, step: BookingStep) -> bool {
        self.missing_fields(step).is_empty()
    }

    /// Fields still missing across every step, in wizard order
    pub fn missing_for_submit(&self) -> Vec<&'static str> {
        BookingStep::ALL
            .iter()
            .flat_map(|step| self.missing_fields(*step))
            .collect()
    }

    pub fn ready_to_submit(&self) -> bool {
        self.missing_for_submit().is_empty()
    }
}

/// Alphabet for reference codes, with look-alike characters removed
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Generate a customer-facing reference code like `AQ-7F3K2Q`
pub fn generate_reference_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| {
            let idx = rng.gen_range(0..REFERENCE_ALPHABET.len());
            REFERENCE_ALPHABET[idx] as char
        })
        .collect();
    format!("AQ-{}", suffix)
}

/// A submitted booking request
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: String,
    /// Customer-facing reference code, e.g. `AQ-7F3K2Q`
    pub reference_code: String,
    /// Client-generated key that makes submission retries safe
    pub submission_key: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: String,
    pub vehicle_year: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub service_id: String,
    pub add_on_ids: Vec<String>,
    pub location: ServiceLocation,
    pub address: Option<String>,
    pub preferred_date: NaiveDate,
    pub time_slot: String,
    /// Server-computed total in whole US dollars
    pub total_price: i64,
    pub status: BookingStatus,
    /// Free-form notes added by staff
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Build a new pending booking from a completed draft.
    ///
    /// The caller is expected to have run the wizard guards and computed the
    /// price beforehand.
    pub fn from_draft(
        draft: BookingDraft,
        submission_key: impl Into<String>,
        total_price: i64,
    ) -> Self {
        let now = Utc::now();
        let address = if is_blank(&draft.address) {
            None
        } else {
            Some(draft.address)
        };
        Self {
            id: Uuid::new_v4().to_string(),
            reference_code: generate_reference_code(),
            submission_key: submission_key.into(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            vehicle_type: draft.vehicle_type,
            vehicle_year: draft.vehicle_year,
            vehicle_make: draft.vehicle_make,
            vehicle_model: draft.vehicle_model,
            service_id: draft.service_id.unwrap_or_default(),
            add_on_ids: draft.add_on_ids,
            location: draft.location,
            address,
            preferred_date: draft.preferred_date.unwrap_or_else(|| now.date_naive()),
            time_slot: draft.time_slot,
            total_price,
            status: BookingStatus::Pending,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> BookingDraft {
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
            add_on_ids: vec!["ceramic-coating".into()],
            location: ServiceLocation::Shop,
            address: String::new(),
            preferred_date: NaiveDate::from_ymd_opt(2025, 6, 14),
            time_slot: "09:00".into(),
        }
    }

    #[test]
    fn steps_are_linear() {
        assert_eq!(BookingStep::PersonalInfo.next(), Some(BookingStep::VehicleInfo));
        assert_eq!(BookingStep::VehicleInfo.next(), Some(BookingStep::ServiceSelection));
        assert_eq!(BookingStep::ServiceSelection.next(), Some(BookingStep::Schedule));
        assert_eq!(BookingStep::Schedule.next(), None);
        assert_eq!(BookingStep::PersonalInfo.prev(), None);
        assert_eq!(BookingStep::Schedule.prev(), Some(BookingStep::ServiceSelection));
    }

    #[test]
    fn step_numbers_round_trip() {
        for step in BookingStep::ALL {
            assert_eq!(BookingStep::from_number(step.number()), Some(step));
        }
        assert_eq!(BookingStep::from_number(0), None);
        assert_eq!(BookingStep::from_number(5), None);
    }

    #[test]
    fn complete_draft_passes_every_step() {
        let draft = sample_draft();
        for step in BookingStep::ALL {
            assert!(draft.can_advance(step), "step {} should pass", step);
        }
        assert!(draft.ready_to_submit());
    }

    #[test]
    fn personal_info_requires_all_four_fields() {
        let mut draft = sample_draft();
        draft.email = String::new();
        assert!(!draft.can_advance(BookingStep::PersonalInfo));
        assert_eq!(draft.missing_fields(BookingStep::PersonalInfo), vec!["email"]);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut draft = sample_draft();
        draft.phone = "   ".into();
        assert_eq!(draft.missing_fields(BookingStep::PersonalInfo), vec!["phone"]);
    }

    #[test]
    fn vehicle_step_reports_every_blank_field() {
        let mut draft = sample_draft();
        draft.vehicle_make = String::new();
        draft.vehicle_model = "  ".into();
        assert_eq!(
            draft.missing_fields(BookingStep::VehicleInfo),
            vec!["vehicle_make", "vehicle_model"]
        );
    }

    #[test]
    fn shop_bookings_do_not_need_an_address() {
        let draft = sample_draft();
        assert!(draft.can_advance(BookingStep::ServiceSelection));
    }

    #[test]
    fn mobile_bookings_need_an_address() {
        let mut draft = sample_draft();
        draft.location = ServiceLocation::Mobile;
        assert_eq!(
            draft.missing_fields(BookingStep::ServiceSelection),
            vec!["address"]
        );
        draft.address = "42 Harbor Ln".into();
        assert!(draft.can_advance(BookingStep::ServiceSelection));
    }

    #[test]
    fn home_bookings_need_an_address() {
        let mut draft = sample_draft();
        draft.location = ServiceLocation::Home;
        assert!(!draft.can_advance(BookingStep::ServiceSelection));
    }

    #[test]
    fn service_selection_requires_a_service() {
        let mut draft = sample_draft();
        draft.service_id = None;
        assert_eq!(
            draft.missing_fields(BookingStep::ServiceSelection),
            vec!["service_id"]
        );
        draft.service_id = Some("  ".into());
        assert_eq!(
            draft.missing_fields(BookingStep::ServiceSelection),
            vec!["service_id"]
        );
    }

    #[test]
    fn schedule_requires_date_and_slot() {
        let mut draft = sample_draft();
        draft.preferred_date = None;
        draft.time_slot = String::new();
        assert_eq!(
            draft.missing_fields(BookingStep::Schedule),
            vec!["preferred_date", "time_slot"]
        );
    }

    #[test]
    fn incomplete_draft_is_not_ready_to_submit() {
        let mut draft = sample_draft();
        draft.vehicle_year = String::new();
        assert!(!draft.ready_to_submit());
        assert_eq!(draft.missing_for_submit(), vec!["vehicle_year"]);
    }

    #[test]
    fn reference_codes_have_the_expected_shape() {
        for _ in 0..100 {
            let code = generate_reference_code();
            assert_eq!(code.len(), 9);
            assert!(code.starts_with("AQ-"));
            assert!(code[3..]
                .bytes()
                .all(|b| REFERENCE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn from_draft_forces_pending_status() {
        let booking = Booking::from_draft(sample_draft(), "key-12345", 275);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, 275);
        assert_eq!(booking.submission_key, "key-12345");
        assert!(booking.address.is_none());
    }

    #[test]
    fn from_draft_keeps_the_address_for_mobile_jobs() {
        let mut draft = sample_draft();
        draft.location = ServiceLocation::Mobile;
        draft.address = "42 Harbor Ln".into();
        let booking = Booking::from_draft(draft, "key-12345", 300);
        assert_eq!(booking.address.as_deref(), Some("42 Harbor Ln"));
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(BookingStatus::parse("Pending"), Some(BookingStatus::Pending));
        assert_eq!(BookingStatus::parse("CONFIRMED"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse("completed"), Some(BookingStatus::Completed));
        assert_eq!(BookingStatus::parse("cancelled"), Some(BookingStatus::Cancelled));
        assert_eq!(BookingStatus::parse("archived"), None);
    }

    #[test]
    fn status_display_matches_wire_format() {
        assert_eq!(BookingStatus::Pending.to_string(), "pending");
        assert_eq!(BookingStatus::Cancelled.to_string(), "cancelled");
    }
}
