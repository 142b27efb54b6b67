//! Subscription Service
//!
//! Wash-club plan management and customer enrollments.

use std::sync::Arc;

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::domain::{
    BillingCadence, CustomerSubscription, DomainError, DomainResult, Page, Storage,
    SubscriptionPlan, SubscriptionStatus,
};
use crate::notifications::{
    Event, SharedEventBus, SubscriptionCreatedEvent, SubscriptionStatusChangedEvent,
};

/// Input for enrolling a customer in a plan
#[derive(Debug, Clone)]
pub struct EnrollmentRequest {
    pub plan_id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle: Option<String>,
}

/// Input for creating or replacing a plan
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: i64,
    pub billing_cadence: BillingCadence,
    pub features: Vec<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

/// Subscription Service
pub struct SubscriptionService {
    storage: Arc<dyn Storage>,
    event_bus: SharedEventBus,
}

impl SubscriptionService {
    pub fn new(storage: Arc<dyn Storage>, event_bus: SharedEventBus) -> Self {
        Self { storage, event_bus }
    }

    /// Active plans for the public plans page
    pub async fn list_public_plans(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        self.storage.list_plans(true).await
    }

    /// Every plan including retired ones, for the admin screen
    pub async fn list_all_plans(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        self.storage.list_plans(false).await
    }

    pub async fn get_plan(&self, id: &str) -> DomainResult<SubscriptionPlan> {
        self.storage
            .get_plan(id)
            .await?
            .ok_or_else(|| DomainError::not_found("plan", id))
    }

    pub async fn create_plan(&self, input: PlanInput) -> DomainResult<SubscriptionPlan> {
        validate_plan_input(&input)?;

        let existing = self.storage.list_plans(false).await?;
        if existing.iter().any(|p| p.slug == input.slug) {
            return Err(DomainError::Conflict(format!(
                "plan slug '{}'",
                input.slug
            )));
        }

        let now = Utc::now();
        let plan = SubscriptionPlan {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            slug: input.slug,
            description: input.description,
            price: input.price,
            billing_cadence: input.billing_cadence,
            features: input.features,
            is_active: input.is_active,
            sort_order: input.sort_order,
            created_at: now,
            updated_at: now,
        };

        let plan = self.storage.save_plan(plan).await?;
        info!("Plan {} ({}) created", plan.name, plan.slug);
        Ok(plan)
    }

    pub async fn update_plan(&self, id: &str, input: PlanInput) -> DomainResult<SubscriptionPlan> {
        validate_plan_input(&input)?;

        let mut plan = self.get_plan(id).await?;

        let existing = self.storage.list_plans(false).await?;
        if existing.iter().any(|p| p.slug == input.slug && p.id != id) {
            return Err(DomainError::Conflict(format!(
                "plan slug '{}'",
                input.slug
            )));
        }

        plan.name = input.name;
        plan.slug = input.slug;
        plan.description = input.description;
        plan.price = input.price;
        plan.billing_cadence = input.billing_cadence;
        plan.features = input.features;
        plan.is_active = input.is_active;
        plan.sort_order = input.sort_order;
        plan.updated_at = Utc::now();

        self.storage.update_plan(plan.clone()).await?;
        Ok(plan)
    }

    /// Enroll a customer in an active plan.
    ///
    /// The billing cycle is copied from the plan at this moment, so later
    /// plan edits never change what the member is billed.
    pub async fn enroll(&self, request: EnrollmentRequest) -> DomainResult<CustomerSubscription> {
        let plan = self.get_plan(&request.plan_id).await?;
        if !plan.is_active {
            return Err(DomainError::Validation(format!(
                "plan '{}' is not open for enrollment",
                plan.slug
            )));
        }

        let subscription = CustomerSubscription::enroll(
            &plan,
            request.customer_name,
            request.email,
            request.phone,
            request.vehicle,
        );
        self.storage.save_subscription(subscription.clone()).await?;

        info!(
            "Subscription {} created on plan {}",
            subscription.id, plan.slug
        );
        metrics::counter!("subscriptions_created_total").increment(1);

        self.event_bus
            .publish(Event::SubscriptionCreated(SubscriptionCreatedEvent {
                subscription_id: subscription.id.clone(),
                plan_slug: plan.slug,
                customer_name: subscription.customer_name.clone(),
                timestamp: Utc::now(),
            }));

        Ok(subscription)
    }

    pub async fn list(
        &self,
        status: Option<SubscriptionStatus>,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<CustomerSubscription>> {
        self.storage.list_subscriptions(status, page, limit).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: SubscriptionStatus,
    ) -> DomainResult<CustomerSubscription> {
        let before = self
            .storage
            .get_subscription(id)
            .await?
            .ok_or_else(|| DomainError::not_found("subscription", id))?;
        let updated = self.storage.update_subscription_status(id, status).await?;

        if before.status != updated.status {
            info!(
                "Subscription {} status: {} -> {}",
                updated.id, before.status, updated.status
            );
            self.event_bus.publish(Event::SubscriptionStatusChanged(
                SubscriptionStatusChangedEvent {
                    subscription_id: updated.id.clone(),
                    old_status: before.status.to_string(),
                    new_status: updated.status.to_string(),
                    timestamp: Utc::now(),
                },
            ));
        }

        Ok(updated)
    }
}

fn validate_plan_input(input: &PlanInput) -> DomainResult<()> {
    if input.name.trim().is_empty() {
        return Err(DomainError::Validation("name must not be empty".to_string()));
    }
    if input.slug.trim().is_empty() {
        return Err(DomainError::Validation("slug must not be empty".to_string()));
    }
    if input.price < 0 {
        return Err(DomainError::Validation(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::notifications::create_event_bus;

    fn service() -> SubscriptionService {
        // Seeded storage has the three stock plans
        SubscriptionService::new(Arc::new(InMemoryStorage::new()), create_event_bus())
    }

    fn enrollment(plan_id: &str) -> EnrollmentRequest {
        EnrollmentRequest {
            plan_id: plan_id.to_string(),
            customer_name: "Dana Reyes".to_string(),
            email: "dana@example.com".to_string(),
            phone: "555-0142".to_string(),
            vehicle: Some("2021 Subaru Outback".to_string()),
        }
    }

    fn plan_input(slug: &str) -> PlanInput {
        PlanInput {
            name: "Fleet Club".to_string(),
            slug: slug.to_string(),
            description: None,
            price: 199,
            billing_cadence: BillingCadence::Monthly,
            features: vec!["Four vehicles".to_string()],
            is_active: true,
            sort_order: 4,
        }
    }

    #[tokio::test]
    async fn stock_plans_are_seeded_and_public() {
        let svc = service();
        let plans = svc.list_public_plans().await.unwrap();
        assert_eq!(plans.len(), 3);
        assert!(plans.iter().any(|p| p.slug == "shine-club"));
    }

    #[tokio::test]
    async fn enroll_copies_the_plan_cadence() {
        let svc = service();
        let plan = svc.list_public_plans().await.unwrap().remove(0);
        let sub = svc.enroll(enrollment(&plan.id)).await.unwrap();

        assert_eq!(sub.plan_id, plan.id);
        assert_eq!(sub.billing_cycle, plan.billing_cadence);
        assert_eq!(sub.status, SubscriptionStatus::Active);

        let (subs, total) = svc.list(None, 1, 50).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(subs[0].id, sub.id);
    }

    #[tokio::test]
    async fn enrolling_in_a_retired_plan_fails() {
        let svc = service();
        let plan = svc.list_public_plans().await.unwrap().remove(0);

        let mut input = plan_input(&plan.slug);
        input.name = plan.name.clone();
        input.is_active = false;
        svc.update_plan(&plan.id, input).await.unwrap();

        let err = svc.enroll(enrollment(&plan.id)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn enrolling_in_an_unknown_plan_fails() {
        let svc = service();
        let err = svc.enroll(enrollment("missing")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn plan_slugs_are_unique() {
        let svc = service();
        svc.create_plan(plan_input("fleet-club")).await.unwrap();
        let err = svc.create_plan(plan_input("fleet-club")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // The stock slugs are taken too
        let err = svc.create_plan(plan_input("shine-club")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn retired_plans_disappear_from_the_public_list() {
        let svc = service();
        let plan = svc.create_plan(plan_input("fleet-club")).await.unwrap();

        let mut input = plan_input("fleet-club");
        input.is_active = false;
        svc.update_plan(&plan.id, input).await.unwrap();

        assert_eq!(svc.list_public_plans().await.unwrap().len(), 3);
        assert_eq!(svc.list_all_plans().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn status_changes_filter_the_list() {
        let svc = service();
        let plan = svc.list_public_plans().await.unwrap().remove(0);
        let sub = svc.enroll(enrollment(&plan.id)).await.unwrap();

        let updated = svc
            .update_status(&sub.id, SubscriptionStatus::Paused)
            .await
            .unwrap();
        assert_eq!(updated.status, SubscriptionStatus::Paused);

        let (active, _) = svc.list(Some(SubscriptionStatus::Active), 1, 50).await.unwrap();
        assert!(active.is_empty());
        let (paused, _) = svc.list(Some(SubscriptionStatus::Paused), 1, 50).await.unwrap();
        assert_eq!(paused.len(), 1);
    }

    #[tokio::test]
    async fn plan_edits_do_not_touch_existing_members() {
        let svc = service();
        let plan = svc
            .create_plan(PlanInput {
                billing_cadence: BillingCadence::Monthly,
                ..plan_input("fleet-club")
            })
            .await
            .unwrap();
        let sub = svc.enroll(enrollment(&plan.id)).await.unwrap();

        let mut input = plan_input("fleet-club");
        input.billing_cadence = BillingCadence::Yearly;
        svc.update_plan(&plan.id, input).await.unwrap();

        let (subs, _) = svc.list(None, 1, 50).await.unwrap();
        assert_eq!(subs[0].id, sub.id);
        assert_eq!(subs[0].billing_cycle, BillingCadence::Monthly);
    }
}
