//! Contact form submissions

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Workflow status of a contact submission.
///
/// Older clients still send `contacted`, which maps to `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    New,
    InProgress,
    Resolved,
    Closed,
}

impl Default for ContactStatus {
    fn default() -> Self {
        Self::New
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Resolved => write!(f, "resolved"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl ContactStatus {
    /// Parse an admin-supplied status string. Unknown values return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "new" => Some(Self::New),
            "in_progress" => Some(Self::InProgress),
            // Legacy alias kept for older admin clients
            "contacted" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A message sent through the public contact form
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Which service the customer asked about, if any
    pub service_interest: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            phone: None,
            service_interest: None,
            message: message.into(),
            status: ContactStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_statuses() {
        assert_eq!(ContactStatus::parse("new"), Some(ContactStatus::New));
        assert_eq!(ContactStatus::parse("in_progress"), Some(ContactStatus::InProgress));
        assert_eq!(ContactStatus::parse("resolved"), Some(ContactStatus::Resolved));
        assert_eq!(ContactStatus::parse("Closed"), Some(ContactStatus::Closed));
    }

    #[test]
    fn parse_maps_legacy_contacted_to_in_progress() {
        assert_eq!(ContactStatus::parse("contacted"), Some(ContactStatus::InProgress));
        assert_eq!(ContactStatus::parse("Contacted"), Some(ContactStatus::InProgress));
    }

    #[test]
    fn parse_rejects_unknown_statuses() {
        assert_eq!(ContactStatus::parse("done"), None);
        assert_eq!(ContactStatus::parse(""), None);
    }

    #[test]
    fn display_uses_snake_case() {
        assert_eq!(ContactStatus::InProgress.to_string(), "in_progress");
        assert_eq!(ContactStatus::New.to_string(), "new");
    }

    #[test]
    fn new_submissions_start_as_new() {
        let submission = ContactSubmission::new("Riley", "riley@example.com", "Quote please");
        assert_eq!(submission.status, ContactStatus::New);
        assert!(submission.phone.is_none());
    }
}
