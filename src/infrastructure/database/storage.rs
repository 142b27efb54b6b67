//! Database storage implementation using SeaORM

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

use super::entities::{
    booking, contact_submission, customer_subscription, gallery_image, home_content,
    subscription_plan,
};
use crate::domain::{
    BillingCadence, Booking, BookingFilter, BookingStatus, ContactStatus, ContactSubmission,
    CustomerSubscription, DomainError, DomainResult, GalleryImage, HomeContent, Page,
    ServiceLocation, Storage, SubscriptionPlan, SubscriptionStatus,
};

/// Database storage implementation
pub struct DatabaseStorage {
    db: DatabaseConnection,
}

impl DatabaseStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get database connection reference
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Helper functions for domain <-> entity conversion

fn booking_status_to_entity(status: BookingStatus) -> booking::BookingStatus {
    match status {
        BookingStatus::Pending => booking::BookingStatus::Pending,
        BookingStatus::Confirmed => booking::BookingStatus::Confirmed,
        BookingStatus::Completed => booking::BookingStatus::Completed,
        BookingStatus::Cancelled => booking::BookingStatus::Cancelled,
    }
}

fn booking_status_to_domain(status: booking::BookingStatus) -> BookingStatus {
    match status {
        booking::BookingStatus::Pending => BookingStatus::Pending,
        booking::BookingStatus::Confirmed => BookingStatus::Confirmed,
        booking::BookingStatus::Completed => BookingStatus::Completed,
        booking::BookingStatus::Cancelled => BookingStatus::Cancelled,
    }
}

fn location_to_entity(location: ServiceLocation) -> booking::ServiceLocation {
    match location {
        ServiceLocation::Shop => booking::ServiceLocation::Shop,
        ServiceLocation::Mobile => booking::ServiceLocation::Mobile,
        ServiceLocation::Home => booking::ServiceLocation::Home,
    }
}

fn location_to_domain(location: booking::ServiceLocation) -> ServiceLocation {
    match location {
        booking::ServiceLocation::Shop => ServiceLocation::Shop,
        booking::ServiceLocation::Mobile => ServiceLocation::Mobile,
        booking::ServiceLocation::Home => ServiceLocation::Home,
    }
}

fn cadence_to_entity(cadence: BillingCadence) -> subscription_plan::BillingCadence {
    match cadence {
        BillingCadence::Monthly => subscription_plan::BillingCadence::Monthly,
        BillingCadence::Quarterly => subscription_plan::BillingCadence::Quarterly,
        BillingCadence::Yearly => subscription_plan::BillingCadence::Yearly,
    }
}

fn cadence_to_domain(cadence: subscription_plan::BillingCadence) -> BillingCadence {
    match cadence {
        subscription_plan::BillingCadence::Monthly => BillingCadence::Monthly,
        subscription_plan::BillingCadence::Quarterly => BillingCadence::Quarterly,
        subscription_plan::BillingCadence::Yearly => BillingCadence::Yearly,
    }
}

fn subscription_status_to_entity(
    status: SubscriptionStatus,
) -> customer_subscription::SubscriptionStatus {
    match status {
        SubscriptionStatus::Active => customer_subscription::SubscriptionStatus::Active,
        SubscriptionStatus::Paused => customer_subscription::SubscriptionStatus::Paused,
        SubscriptionStatus::Cancelled => customer_subscription::SubscriptionStatus::Cancelled,
    }
}

fn subscription_status_to_domain(
    status: customer_subscription::SubscriptionStatus,
) -> SubscriptionStatus {
    match status {
        customer_subscription::SubscriptionStatus::Active => SubscriptionStatus::Active,
        customer_subscription::SubscriptionStatus::Paused => SubscriptionStatus::Paused,
        customer_subscription::SubscriptionStatus::Cancelled => SubscriptionStatus::Cancelled,
    }
}

fn contact_status_to_entity(status: ContactStatus) -> contact_submission::ContactStatus {
    match status {
        ContactStatus::New => contact_submission::ContactStatus::New,
        ContactStatus::InProgress => contact_submission::ContactStatus::InProgress,
        ContactStatus::Resolved => contact_submission::ContactStatus::Resolved,
        ContactStatus::Closed => contact_submission::ContactStatus::Closed,
    }
}

fn contact_status_to_domain(status: contact_submission::ContactStatus) -> ContactStatus {
    match status {
        contact_submission::ContactStatus::New => ContactStatus::New,
        contact_submission::ContactStatus::InProgress => ContactStatus::InProgress,
        contact_submission::ContactStatus::Resolved => ContactStatus::Resolved,
        contact_submission::ContactStatus::Closed => ContactStatus::Closed,
    }
}

fn json_to_string_vec(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn db_error_to_domain(e: DbErr) -> DomainError {
    // Unique-index violations must surface as Conflict so callers can
    // recover, e.g. the booking submit path re-fetching by submission key
    // when two retries race past the pre-check.
    if let Some(SqlErr::UniqueConstraintViolation(message)) = e.sql_err() {
        return DomainError::Conflict(message);
    }
    DomainError::Storage(format!("Database error: {}", e))
}

fn booking_model_to_domain(model: booking::Model) -> Booking {
    Booking {
        id: model.id,
        reference_code: model.reference_code,
        submission_key: model.submission_key,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        phone: model.phone,
        vehicle_type: model.vehicle_type,
        vehicle_year: model.vehicle_year,
        vehicle_make: model.vehicle_make,
        vehicle_model: model.vehicle_model,
        service_id: model.service_id,
        add_on_ids: json_to_string_vec(&model.add_on_ids),
        location: location_to_domain(model.service_location),
        address: model.address,
        preferred_date: model.preferred_date,
        time_slot: model.time_slot,
        total_price: model.total_price,
        status: booking_status_to_domain(model.status),
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn gallery_model_to_domain(model: gallery_image::Model) -> GalleryImage {
    GalleryImage {
        id: model.id,
        title: model.title,
        description: model.description,
        category: model.category,
        before_url: model.before_url,
        after_url: model.after_url,
        before_path: model.before_path,
        after_path: model.after_path,
        is_featured: model.is_featured,
        display_order: model.display_order,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn plan_model_to_domain(model: subscription_plan::Model) -> SubscriptionPlan {
    SubscriptionPlan {
        id: model.id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        price: model.price,
        billing_cadence: cadence_to_domain(model.billing_cadence),
        features: json_to_string_vec(&model.features),
        is_active: model.is_active,
        sort_order: model.sort_order,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn contact_model_to_domain(model: contact_submission::Model) -> ContactSubmission {
    ContactSubmission {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        service_interest: model.service_interest,
        message: model.message,
        status: contact_status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn content_model_to_domain(model: home_content::Model) -> HomeContent {
    HomeContent {
        section: model.section,
        title: model.title,
        subtitle: model.subtitle,
        body: model.body,
        image_url: model.image_url,
        sort_order: model.sort_order,
        updated_at: model.updated_at,
    }
}

/// Clamp paging input the same way for every list query
fn page_window(page: u32, limit: u32) -> (u64, u64) {
    let page = page.max(1) as u64;
    let limit = limit.clamp(1, 100) as u64;
    ((page - 1) * limit, limit)
}

fn subscription_model_to_domain(model: customer_subscription::Model) -> CustomerSubscription {
    CustomerSubscription {
        id: model.id,
        plan_id: model.plan_id,
        customer_name: model.customer_name,
        email: model.email,
        phone: model.phone,
        vehicle: model.vehicle,
        billing_cycle: cadence_to_domain(model.billing_cycle),
        next_billing_date: model.next_billing_date,
        status: subscription_status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl Storage for DatabaseStorage {
    async fn save_booking(&self, b: Booking) -> DomainResult<Booking> {
        debug!("Saving booking {} ({})", b.id, b.reference_code);

        let model = booking::ActiveModel {
            id: Set(b.id),
            reference_code: Set(b.reference_code),
            submission_key: Set(b.submission_key),
            first_name: Set(b.first_name),
            last_name: Set(b.last_name),
            email: Set(b.email),
            phone: Set(b.phone),
            vehicle_type: Set(b.vehicle_type),
            vehicle_year: Set(b.vehicle_year),
            vehicle_make: Set(b.vehicle_make),
            vehicle_model: Set(b.vehicle_model),
            service_id: Set(b.service_id),
            add_on_ids: Set(serde_json::Value::from(b.add_on_ids)),
            service_location: Set(location_to_entity(b.location)),
            address: Set(b.address),
            preferred_date: Set(b.preferred_date),
            time_slot: Set(b.time_slot),
            total_price: Set(b.total_price),
            status: Set(booking_status_to_entity(b.status)),
            notes: Set(b.notes),
            created_at: Set(b.created_at),
            updated_at: Set(b.updated_at),
        };

        let saved = model.insert(&self.db).await.map_err(db_error_to_domain)?;
        info!("Booking saved: {}", saved.reference_code);
        Ok(booking_model_to_domain(saved))
    }

    async fn get_booking(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(model.map(booking_model_to_domain))
    }

    async fn find_booking_by_submission_key(
        &self,
        submission_key: &str,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::SubmissionKey.eq(submission_key))
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(model.map(booking_model_to_domain))
    }

    async fn list_bookings(
        &self,
        filter: BookingFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<Booking>> {
        let mut query = booking::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(booking::Column::Status.eq(booking_status_to_entity(status)));
        }
        if let Some(date) = filter.preferred_date {
            query = query.filter(booking::Column::PreferredDate.eq(date));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        let (offset, limit) = page_window(page, limit);
        let models = query
            .order_by_desc(booking::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        Ok((
            models.into_iter().map(booking_model_to_domain).collect(),
            total,
        ))
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> DomainResult<Booking> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        let Some(model) = model else {
            return Err(DomainError::not_found("booking", id));
        };

        let mut active: booking::ActiveModel = model.into();
        active.status = Set(booking_status_to_entity(status));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_error_to_domain)?;
        Ok(booking_model_to_domain(updated))
    }

    async fn count_bookings(&self, status: Option<BookingStatus>) -> DomainResult<u64> {
        let mut query = booking::Entity::find();
        if let Some(status) = status {
            query = query.filter(booking::Column::Status.eq(booking_status_to_entity(status)));
        }
        query.count(&self.db).await.map_err(db_error_to_domain)
    }

    async fn save_contact(&self, c: ContactSubmission) -> DomainResult<ContactSubmission> {
        debug!("Saving contact submission {}", c.id);

        let model = contact_submission::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            email: Set(c.email),
            phone: Set(c.phone),
            service_interest: Set(c.service_interest),
            message: Set(c.message),
            status: Set(contact_status_to_entity(c.status)),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        };

        let saved = model.insert(&self.db).await.map_err(db_error_to_domain)?;
        Ok(contact_model_to_domain(saved))
    }

    async fn get_contact(&self, id: &str) -> DomainResult<Option<ContactSubmission>> {
        let model = contact_submission::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(model.map(contact_model_to_domain))
    }

    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<ContactSubmission>> {
        let mut query = contact_submission::Entity::find();
        if let Some(status) = status {
            query = query
                .filter(contact_submission::Column::Status.eq(contact_status_to_entity(status)));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        let (offset, limit) = page_window(page, limit);
        let models = query
            .order_by_desc(contact_submission::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        Ok((
            models.into_iter().map(contact_model_to_domain).collect(),
            total,
        ))
    }

    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> DomainResult<ContactSubmission> {
        let model = contact_submission::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        let Some(model) = model else {
            return Err(DomainError::not_found("contact submission", id));
        };

        let mut active: contact_submission::ActiveModel = model.into();
        active.status = Set(contact_status_to_entity(status));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_error_to_domain)?;
        Ok(contact_model_to_domain(updated))
    }

    async fn count_contacts(&self, status: Option<ContactStatus>) -> DomainResult<u64> {
        let mut query = contact_submission::Entity::find();
        if let Some(status) = status {
            query = query
                .filter(contact_submission::Column::Status.eq(contact_status_to_entity(status)));
        }
        query.count(&self.db).await.map_err(db_error_to_domain)
    }

    async fn save_gallery_image(&self, image: GalleryImage) -> DomainResult<()> {
        let model = gallery_image::ActiveModel {
            id: Set(image.id),
            title: Set(image.title),
            description: Set(image.description),
            category: Set(image.category),
            before_url: Set(image.before_url),
            after_url: Set(image.after_url),
            before_path: Set(image.before_path),
            after_path: Set(image.after_path),
            is_featured: Set(image.is_featured),
            display_order: Set(image.display_order),
            is_active: Set(image.is_active),
            created_at: Set(image.created_at),
            updated_at: Set(image.updated_at),
        };

        model.insert(&self.db).await.map_err(db_error_to_domain)?;
        Ok(())
    }

    async fn get_gallery_image(&self, id: &str) -> DomainResult<Option<GalleryImage>> {
        let model = gallery_image::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(model.map(gallery_model_to_domain))
    }

    async fn list_gallery_images(&self, only_active: bool) -> DomainResult<Vec<GalleryImage>> {
        let mut query = gallery_image::Entity::find();
        if only_active {
            query = query.filter(gallery_image::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_asc(gallery_image::Column::DisplayOrder)
            .order_by_desc(gallery_image::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(models.into_iter().map(gallery_model_to_domain).collect())
    }

    async fn update_gallery_image(&self, image: GalleryImage) -> DomainResult<()> {
        let existing = gallery_image::Entity::find_by_id(&image.id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        if existing.is_none() {
            return Err(DomainError::not_found("gallery image", image.id));
        }

        let model = gallery_image::ActiveModel {
            id: Set(image.id),
            title: Set(image.title),
            description: Set(image.description),
            category: Set(image.category),
            before_url: Set(image.before_url),
            after_url: Set(image.after_url),
            before_path: Set(image.before_path),
            after_path: Set(image.after_path),
            is_featured: Set(image.is_featured),
            display_order: Set(image.display_order),
            is_active: Set(image.is_active),
            created_at: Set(image.created_at),
            updated_at: Set(Utc::now()),
        };

        model.update(&self.db).await.map_err(db_error_to_domain)?;
        Ok(())
    }

    async fn delete_gallery_image(&self, id: &str) -> DomainResult<Option<GalleryImage>> {
        let model = gallery_image::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        let Some(model) = model else {
            return Ok(None);
        };

        gallery_image::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        info!("Gallery image deleted: {}", id);
        Ok(Some(gallery_model_to_domain(model)))
    }

    async fn count_gallery_images(&self, only_active: bool) -> DomainResult<u64> {
        let mut query = gallery_image::Entity::find();
        if only_active {
            query = query.filter(gallery_image::Column::IsActive.eq(true));
        }
        query.count(&self.db).await.map_err(db_error_to_domain)
    }

    async fn get_plan(&self, id: &str) -> DomainResult<Option<SubscriptionPlan>> {
        let model = subscription_plan::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(model.map(plan_model_to_domain))
    }

    async fn list_plans(&self, only_active: bool) -> DomainResult<Vec<SubscriptionPlan>> {
        let mut query = subscription_plan::Entity::find();
        if only_active {
            query = query.filter(subscription_plan::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_asc(subscription_plan::Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(models.into_iter().map(plan_model_to_domain).collect())
    }

    async fn save_plan(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan> {
        let model = subscription_plan::ActiveModel {
            id: Set(plan.id),
            name: Set(plan.name),
            slug: Set(plan.slug),
            description: Set(plan.description),
            price: Set(plan.price),
            billing_cadence: Set(cadence_to_entity(plan.billing_cadence)),
            features: Set(serde_json::Value::from(plan.features)),
            is_active: Set(plan.is_active),
            sort_order: Set(plan.sort_order),
            created_at: Set(plan.created_at),
            updated_at: Set(plan.updated_at),
        };

        let saved = model.insert(&self.db).await.map_err(db_error_to_domain)?;
        info!("Subscription plan saved: {}", saved.slug);
        Ok(plan_model_to_domain(saved))
    }

    async fn update_plan(&self, plan: SubscriptionPlan) -> DomainResult<()> {
        let existing = subscription_plan::Entity::find_by_id(&plan.id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        if existing.is_none() {
            return Err(DomainError::not_found("plan", plan.id));
        }

        let model = subscription_plan::ActiveModel {
            id: Set(plan.id),
            name: Set(plan.name),
            slug: Set(plan.slug),
            description: Set(plan.description),
            price: Set(plan.price),
            billing_cadence: Set(cadence_to_entity(plan.billing_cadence)),
            features: Set(serde_json::Value::from(plan.features)),
            is_active: Set(plan.is_active),
            sort_order: Set(plan.sort_order),
            created_at: Set(plan.created_at),
            updated_at: Set(Utc::now()),
        };

        model.update(&self.db).await.map_err(db_error_to_domain)?;
        Ok(())
    }

    async fn save_subscription(&self, subscription: CustomerSubscription) -> DomainResult<()> {
        let model = customer_subscription::ActiveModel {
            id: Set(subscription.id),
            plan_id: Set(subscription.plan_id),
            customer_name: Set(subscription.customer_name),
            email: Set(subscription.email),
            phone: Set(subscription.phone),
            vehicle: Set(subscription.vehicle),
            billing_cycle: Set(cadence_to_entity(subscription.billing_cycle)),
            next_billing_date: Set(subscription.next_billing_date),
            status: Set(subscription_status_to_entity(subscription.status)),
            created_at: Set(subscription.created_at),
            updated_at: Set(subscription.updated_at),
        };

        model.insert(&self.db).await.map_err(db_error_to_domain)?;
        Ok(())
    }

    async fn get_subscription(&self, id: &str) -> DomainResult<Option<CustomerSubscription>> {
        let model = customer_subscription::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(model.map(subscription_model_to_domain))
    }

    async fn list_subscriptions(
        &self,
        status: Option<SubscriptionStatus>,
        page: u32,
        limit: u32,
    ) -> DomainResult<Page<CustomerSubscription>> {
        let mut query = customer_subscription::Entity::find();
        if let Some(status) = status {
            query = query.filter(
                customer_subscription::Column::Status.eq(subscription_status_to_entity(status)),
            );
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        let (offset, limit) = page_window(page, limit);
        let models = query
            .order_by_desc(customer_subscription::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        Ok((
            models
                .into_iter()
                .map(subscription_model_to_domain)
                .collect(),
            total,
        ))
    }

    async fn update_subscription_status(
        &self,
        id: &str,
        status: SubscriptionStatus,
    ) -> DomainResult<CustomerSubscription> {
        let model = customer_subscription::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        let Some(model) = model else {
            return Err(DomainError::not_found("subscription", id));
        };

        let mut active: customer_subscription::ActiveModel = model.into();
        active.status = Set(subscription_status_to_entity(status));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_error_to_domain)?;
        Ok(subscription_model_to_domain(updated))
    }

    async fn count_subscriptions(&self, status: Option<SubscriptionStatus>) -> DomainResult<u64> {
        let mut query = customer_subscription::Entity::find();
        if let Some(status) = status {
            query = query.filter(
                customer_subscription::Column::Status.eq(subscription_status_to_entity(status)),
            );
        }
        query.count(&self.db).await.map_err(db_error_to_domain)
    }

    async fn get_content(&self, section: &str) -> DomainResult<Option<HomeContent>> {
        let model = home_content::Entity::find_by_id(section)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(model.map(content_model_to_domain))
    }

    async fn list_content(&self) -> DomainResult<Vec<HomeContent>> {
        let models = home_content::Entity::find()
            .order_by_asc(home_content::Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(db_error_to_domain)?;
        Ok(models.into_iter().map(content_model_to_domain).collect())
    }

    async fn upsert_content(&self, content: HomeContent) -> DomainResult<HomeContent> {
        let existing = home_content::Entity::find_by_id(&content.section)
            .one(&self.db)
            .await
            .map_err(db_error_to_domain)?;

        let model = home_content::ActiveModel {
            section: Set(content.section),
            title: Set(content.title),
            subtitle: Set(content.subtitle),
            body: Set(content.body),
            image_url: Set(content.image_url),
            sort_order: Set(content.sort_order),
            updated_at: Set(Utc::now()),
        };

        let saved = if existing.is_some() {
            model.update(&self.db).await.map_err(db_error_to_domain)?
        } else {
            model.insert(&self.db).await.map_err(db_error_to_domain)?
        };
        Ok(content_model_to_domain(saved))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingDraft;
    use crate::infrastructure::database::migrator::Migrator;
    use chrono::NaiveDate;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn storage() -> DatabaseStorage {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        DatabaseStorage::new(db)
    }

    fn sample_booking(submission_key: &str) -> Booking {
        let draft = BookingDraft {
            first_name: "Dana".into(),
            last_name: "Reyes".into(),
            email: "dana@example.com".into(),
            phone: "555-0142".into(),
            vehicle_type: "suv".into(),
            vehicle_year: "2021".into(),
            vehicle_make: "Subaru".into(),
            vehicle_model: "Outback".into(),
            service_id: Some("full-detail".into()),
            add_on_ids: vec![],
            location: ServiceLocation::Shop,
            address: String::new(),
            preferred_date: NaiveDate::from_ymd_opt(2025, 6, 14),
            time_slot: "09:00".into(),
        };
        Booking::from_draft(draft, submission_key, 150)
    }

    #[tokio::test]
    async fn duplicate_submission_key_insert_yields_conflict() {
        let storage = storage().await;
        storage
            .save_booking(sample_booking("key-0001"))
            .await
            .unwrap();

        // The second insert hits the unique index on submission_key.
        // It must come back as Conflict so the submit path can fall back
        // to the already-stored booking instead of reporting a failure.
        let err = storage
            .save_booking(sample_booking("key-0001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let survivor = storage
            .find_booking_by_submission_key("key-0001")
            .await
            .unwrap();
        assert!(survivor.is_some());
    }
}
