//! Migration to create home_content table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HomeContent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HomeContent::Section)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HomeContent::Title).string_len(150).not_null())
                    .col(ColumnDef::new(HomeContent::Subtitle).string_len(255).null())
                    .col(ColumnDef::new(HomeContent::Body).text().null())
                    .col(ColumnDef::new(HomeContent::ImageUrl).string_len(512).null())
                    .col(
                        ColumnDef::new(HomeContent::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(HomeContent::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HomeContent::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HomeContent {
    Table,
    Section,
    Title,
    Subtitle,
    Body,
    ImageUrl,
    SortOrder,
    UpdatedAt,
}
