//! Migration to create bookings table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::ReferenceCode).string_len(16).not_null())
                    .col(ColumnDef::new(Bookings::SubmissionKey).string_len(64).not_null())
                    .col(ColumnDef::new(Bookings::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Bookings::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Bookings::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Bookings::Phone).string_len(32).not_null())
                    .col(ColumnDef::new(Bookings::VehicleType).string_len(50).not_null())
                    .col(ColumnDef::new(Bookings::VehicleYear).string_len(10).not_null())
                    .col(ColumnDef::new(Bookings::VehicleMake).string_len(50).not_null())
                    .col(ColumnDef::new(Bookings::VehicleModel).string_len(50).not_null())
                    .col(ColumnDef::new(Bookings::ServiceId).string_len(64).not_null())
                    .col(ColumnDef::new(Bookings::AddOnIds).json().not_null())
                    .col(
                        ColumnDef::new(Bookings::ServiceLocation)
                            .string_len(10)
                            .not_null()
                            .default("shop"),
                    )
                    .col(ColumnDef::new(Bookings::Address).string_len(255).null())
                    .col(ColumnDef::new(Bookings::PreferredDate).date().not_null())
                    .col(ColumnDef::new(Bookings::TimeSlot).string_len(32).not_null())
                    .col(ColumnDef::new(Bookings::TotalPrice).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Bookings::Notes).text().null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Submission keys must be unique so retried submissions collapse
        // into a single booking
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_submission_key")
                    .table(Bookings::Table)
                    .col(Bookings::SubmissionKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_preferred_date")
                    .table(Bookings::Table)
                    .col(Bookings::PreferredDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    ReferenceCode,
    SubmissionKey,
    FirstName,
    LastName,
    Email,
    Phone,
    VehicleType,
    VehicleYear,
    VehicleMake,
    VehicleModel,
    ServiceId,
    AddOnIds,
    ServiceLocation,
    Address,
    PreferredDate,
    TimeSlot,
    TotalPrice,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
