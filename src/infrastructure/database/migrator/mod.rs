//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_bookings;
mod m20250101_000002_create_contact_submissions;
mod m20250101_000003_create_gallery_images;
mod m20250101_000004_create_subscription_plans;
mod m20250101_000005_create_customer_subscriptions;
mod m20250101_000006_create_home_content;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_bookings::Migration),
            Box::new(m20250101_000002_create_contact_submissions::Migration),
            Box::new(m20250101_000003_create_gallery_images::Migration),
            Box::new(m20250101_000004_create_subscription_plans::Migration),
            Box::new(m20250101_000005_create_customer_subscriptions::Migration),
            Box::new(m20250101_000006_create_home_content::Migration),
        ]
    }
}
