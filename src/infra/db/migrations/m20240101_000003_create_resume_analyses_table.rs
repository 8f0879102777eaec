//! Migration: Create resume_analyses table (one row per resume).

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_resumes_table::Resumes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResumeAnalyses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResumeAnalyses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ResumeAnalyses::ResumeId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ResumeAnalyses::AtsScore).double().not_null())
                    .col(ColumnDef::new(ResumeAnalyses::GrammarScore).double().not_null())
                    .col(
                        ColumnDef::new(ResumeAnalyses::FormattingScore)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResumeAnalyses::KeywordScore).double().not_null())
                    .col(ColumnDef::new(ResumeAnalyses::Skills).json().not_null())
                    .col(ColumnDef::new(ResumeAnalyses::Strengths).json().not_null())
                    .col(ColumnDef::new(ResumeAnalyses::Weaknesses).json().not_null())
                    .col(ColumnDef::new(ResumeAnalyses::Suggestions).json().not_null())
                    .col(
                        ColumnDef::new(ResumeAnalyses::AnalyzedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resume_analyses_resume_id")
                            .from(ResumeAnalyses::Table, ResumeAnalyses::ResumeId)
                            .to(Resumes::Table, Resumes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResumeAnalyses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ResumeAnalyses {
    Table,
    Id,
    ResumeId,
    AtsScore,
    GrammarScore,
    FormattingScore,
    KeywordScore,
    Skills,
    Strengths,
    Weaknesses,
    Suggestions,
    AnalyzedAt,
}
