//! Migration to create gallery_images table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GalleryImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GalleryImages::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GalleryImages::Title).string_len(150).not_null())
                    .col(ColumnDef::new(GalleryImages::Description).string_len(500).null())
                    .col(ColumnDef::new(GalleryImages::Category).string_len(64).not_null())
                    .col(ColumnDef::new(GalleryImages::BeforeUrl).string_len(512).not_null())
                    .col(ColumnDef::new(GalleryImages::AfterUrl).string_len(512).not_null())
                    .col(ColumnDef::new(GalleryImages::BeforePath).string_len(512).not_null())
                    .col(ColumnDef::new(GalleryImages::AfterPath).string_len(512).not_null())
                    .col(
                        ColumnDef::new(GalleryImages::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GalleryImages::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GalleryImages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GalleryImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GalleryImages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_images_is_active")
                    .table(GalleryImages::Table)
                    .col(GalleryImages::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_images_category")
                    .table(GalleryImages::Table)
                    .col(GalleryImages::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GalleryImages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GalleryImages {
    Table,
    Id,
    Title,
    Description,
    Category,
    BeforeUrl,
    AfterUrl,
    BeforePath,
    AfterPath,
    IsFeatured,
    DisplayOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
