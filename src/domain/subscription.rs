//! Wash-club subscription plans and customer enrollments

use chrono::{DateTime, Months, NaiveDate, Utc};
use uuid::Uuid;

/// How often a subscription bills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingCadence {
    Monthly,
    Quarterly,
    Yearly,
}

impl Default for BillingCadence {
    fn default() -> Self {
        Self::Monthly
    }
}

impl std::fmt::Display for BillingCadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl BillingCadence {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Yearly => 12,
        }
    }

    /// First billing date after `from`. Month-end dates clamp, so enrolling
    /// on Jan 31 bills next on Feb 28/29.
    pub fn next_billing_date(&self, from: NaiveDate) -> NaiveDate {
        from.checked_add_months(Months::new(self.months()))
            .unwrap_or(from)
    }
}

/// Status of a customer subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl SubscriptionStatus {
    /// Parse an admin-supplied status string. Unknown values return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A sellable wash-club plan
#[derive(Debug, Clone)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    /// URL-friendly identifier, unique across plans
    pub slug: String,
    pub description: Option<String>,
    /// Price per billing period in whole US dollars
    pub price: i64,
    pub billing_cadence: BillingCadence,
    /// Marketing bullet points shown on the plans page
    pub features: Vec<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A customer enrolled in a plan.
///
/// The billing cycle is copied from the plan at enrollment time, so later
/// plan edits never change what an existing member is billed.
#[derive(Debug, Clone)]
pub struct CustomerSubscription {
    pub id: String,
    pub plan_id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle: Option<String>,
    pub billing_cycle: BillingCadence,
    pub next_billing_date: NaiveDate,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three stock wash-club plans seeded on first start
pub fn default_plans() -> Vec<SubscriptionPlan> {
    let plan = |name: &str, slug: &str, price: i64, features: &[&str], sort_order: i32| {
        let now = Utc::now();
        SubscriptionPlan {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            price,
            billing_cadence: BillingCadence::Monthly,
            features: features.iter().map(|f| f.to_string()).collect(),
            is_active: true,
            sort_order,
            created_at: now,
            updated_at: now,
        }
    };

    vec![
        plan(
            "Shine Club",
            "shine-club",
            39,
            &["Two express washes per month", "10% off add-ons"],
            1,
        ),
        plan(
            "Gloss Club",
            "gloss-club",
            79,
            &[
                "One exterior detail per month",
                "Free odor treatment",
                "15% off add-ons",
            ],
            2,
        ),
        plan(
            "Showroom Club",
            "showroom-club",
            149,
            &[
                "One full detail per month",
                "Priority scheduling",
                "20% off add-ons",
            ],
            3,
        ),
    ]
}

impl CustomerSubscription {
    /// Enroll a customer in `plan` starting today
    pub fn enroll(
        plan: &SubscriptionPlan,
        customer_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        vehicle: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let today = now.date_naive();
        Self {
            id: Uuid::new_v4().to_string(),
            plan_id: plan.id.clone(),
            customer_name: customer_name.into(),
            email: email.into(),
            phone: phone.into(),
            vehicle,
            billing_cycle: plan.billing_cadence,
            next_billing_date: plan.billing_cadence.next_billing_date(today),
            status: SubscriptionStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_plan(cadence: BillingCadence) -> SubscriptionPlan {
        let now = Utc::now();
        SubscriptionPlan {
            id: "plan-1".into(),
            name: "Shine Club".into(),
            slug: "shine-club".into(),
            description: None,
            price: 39,
            billing_cadence: cadence,
            features: vec!["Two express washes per month".into()],
            is_active: true,
            sort_order: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn monthly_billing_advances_one_month() {
        assert_eq!(
            BillingCadence::Monthly.next_billing_date(date(2025, 3, 15)),
            date(2025, 4, 15)
        );
    }

    #[test]
    fn quarterly_billing_advances_three_months() {
        assert_eq!(
            BillingCadence::Quarterly.next_billing_date(date(2025, 3, 15)),
            date(2025, 6, 15)
        );
    }

    #[test]
    fn yearly_billing_advances_twelve_months() {
        assert_eq!(
            BillingCadence::Yearly.next_billing_date(date(2025, 3, 15)),
            date(2026, 3, 15)
        );
    }

    #[test]
    fn month_end_dates_clamp() {
        assert_eq!(
            BillingCadence::Monthly.next_billing_date(date(2025, 1, 31)),
            date(2025, 2, 28)
        );
        assert_eq!(
            BillingCadence::Monthly.next_billing_date(date(2024, 1, 31)),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn enroll_copies_the_plan_cadence() {
        let plan = sample_plan(BillingCadence::Quarterly);
        let sub = CustomerSubscription::enroll(&plan, "Dana", "dana@example.com", "555-0142", None);
        assert_eq!(sub.billing_cycle, BillingCadence::Quarterly);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.plan_id, "plan-1");
    }

    #[test]
    fn cadence_parse_and_display() {
        assert_eq!(BillingCadence::parse("monthly"), Some(BillingCadence::Monthly));
        assert_eq!(BillingCadence::parse("Quarterly"), Some(BillingCadence::Quarterly));
        assert_eq!(BillingCadence::parse("weekly"), None);
        assert_eq!(BillingCadence::Yearly.to_string(), "yearly");
    }

    #[test]
    fn default_plans_are_active_with_unique_slugs() {
        let plans = default_plans();
        assert_eq!(plans.len(), 3);
        assert!(plans.iter().all(|p| p.is_active));
        let mut slugs: Vec<_> = plans.iter().map(|p| p.slug.clone()).collect();
        slugs.dedup();
        assert_eq!(slugs.len(), 3);
    }

    #[test]
    fn subscription_status_parse() {
        assert_eq!(SubscriptionStatus::parse("active"), Some(SubscriptionStatus::Active));
        assert_eq!(SubscriptionStatus::parse("PAUSED"), Some(SubscriptionStatus::Paused));
        assert_eq!(SubscriptionStatus::parse("cancelled"), Some(SubscriptionStatus::Cancelled));
        assert_eq!(SubscriptionStatus::parse("expired"), None);
    }
}
