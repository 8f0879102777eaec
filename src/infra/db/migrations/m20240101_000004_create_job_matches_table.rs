//! Migration: Create job_matches table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_resumes_table::Resumes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobMatches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JobMatches::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JobMatches::ResumeId).uuid().not_null())
                    .col(ColumnDef::new(JobMatches::UserId).uuid().not_null())
                    .col(ColumnDef::new(JobMatches::JobTitle).string().not_null())
                    .col(ColumnDef::new(JobMatches::JobDescription).text().not_null())
                    .col(ColumnDef::new(JobMatches::MatchScore).double().not_null())
                    .col(ColumnDef::new(JobMatches::OverlappingSkills).json().not_null())
                    .col(ColumnDef::new(JobMatches::MissingSkills).json().not_null())
                    .col(ColumnDef::new(JobMatches::Suggestions).json().not_null())
                    .col(
                        ColumnDef::new(JobMatches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_matches_resume_id")
                            .from(JobMatches::Table, JobMatches::ResumeId)
                            .to(Resumes::Table, Resumes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_matches_user_id")
                            .from(JobMatches::Table, JobMatches::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_job_matches_user_id_created_at")
                    .table(JobMatches::Table)
                    .col(JobMatches::UserId)
                    .col(JobMatches::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobMatches::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum JobMatches {
    Table,
    Id,
    ResumeId,
    UserId,
    JobTitle,
    JobDescription,
    MatchScore,
    OverlappingSkills,
    MissingSkills,
    Suggestions,
    CreatedAt,
}
