//! Resume analysis repository. At most one analysis per resume.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::resume_analysis::{self, ActiveModel, Entity as AnalysisEntity};
use crate::domain::{AnalysisReport, ResumeAnalysis};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Insert or replace the analysis of a resume
    async fn upsert(&self, resume_id: Uuid, report: AnalysisReport) -> AppResult<ResumeAnalysis>;

    async fn find_by_resume(&self, resume_id: Uuid) -> AppResult<Option<ResumeAnalysis>>;
}

pub struct AnalysisStore {
    db: DatabaseConnection,
}

impl AnalysisStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnalysisRepository for AnalysisStore {
    async fn upsert(&self, resume_id: Uuid, report: AnalysisReport) -> AppResult<ResumeAnalysis> {
        use resume_analysis::Column;

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            resume_id: Set(resume_id),
            ats_score: Set(report.ats_score),
            grammar_score: Set(report.grammar_score),
            formatting_score: Set(report.formatting_score),
            keyword_score: Set(report.keyword_score),
            skills: Set(report.skills.into()),
            strengths: Set(report.feedback.strengths.into()),
            weaknesses: Set(report.feedback.weaknesses.into()),
            suggestions: Set(report.suggestions.into()),
            analyzed_at: Set(chrono::Utc::now()),
        };

        // Re-analysis keeps the row id and replaces everything else
        let model = AnalysisEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(Column::ResumeId)
                    .update_columns([
                        Column::AtsScore,
                        Column::GrammarScore,
                        Column::FormattingScore,
                        Column::KeywordScore,
                        Column::Skills,
                        Column::Strengths,
                        Column::Weaknesses,
                        Column::Suggestions,
                        Column::AnalyzedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ResumeAnalysis::from(model))
    }

    async fn find_by_resume(&self, resume_id: Uuid) -> AppResult<Option<ResumeAnalysis>> {
        let result = AnalysisEntity::find()
            .filter(resume_analysis::Column::ResumeId.eq(resume_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ResumeAnalysis::from))
    }
}
