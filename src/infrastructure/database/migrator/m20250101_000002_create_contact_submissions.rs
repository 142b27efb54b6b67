//! Migration to create contact_submissions table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactSubmissions::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactSubmissions::Name).string_len(100).not_null())
                    .col(ColumnDef::new(ContactSubmissions::Email).string_len(255).not_null())
                    .col(ColumnDef::new(ContactSubmissions::Phone).string_len(32).null())
                    .col(
                        ColumnDef::new(ContactSubmissions::ServiceInterest)
                            .string_len(64)
                            .null(),
                    )
                    .col(ColumnDef::new(ContactSubmissions::Message).text().not_null())
                    .col(
                        ColumnDef::new(ContactSubmissions::Status)
                            .string_len(20)
                            .not_null()
                            .default("new"),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contact_submissions_status")
                    .table(ContactSubmissions::Table)
                    .col(ContactSubmissions::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactSubmissions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContactSubmissions {
    Table,
    Id,
    Name,
    Email,
    Phone,
    ServiceInterest,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}
