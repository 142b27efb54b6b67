//! Migration to create subscription_plans table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionPlans::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::Name).string_len(100).not_null())
                    .col(ColumnDef::new(SubscriptionPlans::Slug).string_len(64).not_null())
                    .col(ColumnDef::new(SubscriptionPlans::Description).string_len(500).null())
                    .col(ColumnDef::new(SubscriptionPlans::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(SubscriptionPlans::BillingCadence)
                            .string_len(10)
                            .not_null()
                            .default("monthly"),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::Features).json().not_null())
                    .col(
                        ColumnDef::new(SubscriptionPlans::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscription_plans_slug")
                    .table(SubscriptionPlans::Table)
                    .col(SubscriptionPlans::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubscriptionPlans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SubscriptionPlans {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Price,
    BillingCadence,
    Features,
    IsActive,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}
