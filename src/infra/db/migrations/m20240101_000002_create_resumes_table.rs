//! Migration: Create resumes table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resumes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Resumes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Resumes::UserId).uuid().not_null())
                    .col(ColumnDef::new(Resumes::Filename).string().not_null())
                    .col(ColumnDef::new(Resumes::FileType).string_len(8).not_null())
                    .col(ColumnDef::new(Resumes::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Resumes::StorageKey).string().not_null())
                    .col(ColumnDef::new(Resumes::ContentText).text().not_null())
                    .col(
                        ColumnDef::new(Resumes::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resumes_user_id")
                            .from(Resumes::Table, Resumes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is per user, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_resumes_user_id_uploaded_at")
                    .table(Resumes::Table)
                    .col(Resumes::UserId)
                    .col(Resumes::UploadedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resumes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Resumes {
    Table,
    Id,
    UserId,
    Filename,
    FileType,
    FileSize,
    StorageKey,
    ContentText,
    UploadedAt,
}
