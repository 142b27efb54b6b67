//! Migration to create customer_subscriptions table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerSubscriptions::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CustomerSubscriptions::PlanId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerSubscriptions::CustomerName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomerSubscriptions::Email).string_len(255).not_null())
                    .col(ColumnDef::new(CustomerSubscriptions::Phone).string_len(32).not_null())
                    .col(ColumnDef::new(CustomerSubscriptions::Vehicle).string_len(100).null())
                    .col(
                        ColumnDef::new(CustomerSubscriptions::BillingCycle)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerSubscriptions::NextBillingDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerSubscriptions::Status)
                            .string_len(10)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(CustomerSubscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerSubscriptions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_subscriptions_plan")
                            .from(CustomerSubscriptions::Table, CustomerSubscriptions::PlanId)
                            .to(SubscriptionPlans::Table, SubscriptionPlans::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customer_subscriptions_status")
                    .table(CustomerSubscriptions::Table)
                    .col(CustomerSubscriptions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customer_subscriptions_plan_id")
                    .table(CustomerSubscriptions::Table)
                    .col(CustomerSubscriptions::PlanId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerSubscriptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CustomerSubscriptions {
    Table,
    Id,
    PlanId,
    CustomerName,
    Email,
    Phone,
    Vehicle,
    BillingCycle,
    NextBillingDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SubscriptionPlans {
    Table,
    Id,
}
