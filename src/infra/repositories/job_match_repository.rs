//! Job match history repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::job_match::{self, ActiveModel, Entity as JobMatchEntity};
use crate::domain::{JobMatch, NewJobMatch};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobMatchRepository: Send + Sync {
    async fn create(&self, job_match: NewJobMatch) -> AppResult<JobMatch>;

    /// A page of the user's matches, newest first, with the total count
    async fn list_for_user(
        &self,
        user_id: Uuid,
        resume_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<JobMatch>, u64)>;
}

pub struct JobMatchStore {
    db: DatabaseConnection,
}

impl JobMatchStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JobMatchRepository for JobMatchStore {
    async fn create(&self, job_match: NewJobMatch) -> AppResult<JobMatch> {
        let report = job_match.report;
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            resume_id: Set(job_match.resume_id),
            user_id: Set(job_match.user_id),
            job_title: Set(job_match.job_title),
            job_description: Set(job_match.job_description),
            match_score: Set(report.match_score),
            overlapping_skills: Set(report.overlapping_skills.into()),
            missing_skills: Set(report.missing_skills.into()),
            suggestions: Set(report.suggestions.into()),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(JobMatch::from(model))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        resume_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<JobMatch>, u64)> {
        let mut query = JobMatchEntity::find().filter(job_match::Column::UserId.eq(user_id));
        if let Some(resume_id) = resume_id {
            query = query.filter(job_match::Column::ResumeId.eq(resume_id));
        }

        let paginator = query
            .order_by_desc(job_match::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(JobMatch::from).collect(), total))
    }
}
