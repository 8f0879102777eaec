//! Resume repository. Every lookup is scoped to the owning user.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::resume::{self, ActiveModel, Entity as ResumeEntity};
use crate::domain::{NewResume, Resume};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Persist a freshly uploaded resume
    async fn create(&self, resume: NewResume) -> AppResult<Resume>;

    /// Find a resume owned by `user_id`
    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Resume>>;

    /// All resumes of a user, newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Resume>>;
}

pub struct ResumeStore {
    db: DatabaseConnection,
}

impl ResumeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResumeRepository for ResumeStore {
    async fn create(&self, resume: NewResume) -> AppResult<Resume> {
        let active_model = ActiveModel {
            id: Set(resume.id),
            user_id: Set(resume.user_id),
            filename: Set(resume.filename),
            file_type: Set(resume.file_type.into()),
            file_size: Set(resume.file_size),
            storage_key: Set(resume.storage_key),
            content_text: Set(resume.content_text),
            uploaded_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Resume::from(model))
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Resume>> {
        let result = ResumeEntity::find_by_id(id)
            .filter(resume::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Resume::from))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Resume>> {
        let models = ResumeEntity::find()
            .filter(resume::Column::UserId.eq(user_id))
            .order_by_desc(resume::Column::UploadedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Resume::from).collect())
    }
}
