//! Resume service - upload, listing, deletion and analysis.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use uuid::Uuid;

use crate::analysis;
use crate::domain::{storage_key, FileType, NewResume, Resume, ResumeAnalysis};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{FileStorage, UnitOfWork};
use crate::with_transaction;

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[async_trait]
pub trait ResumeService: Send + Sync {
    /// Validate, extract, store and record an uploaded resume
    async fn upload(&self, user_id: Uuid, file: UploadedFile) -> AppResult<Resume>;

    /// The user's resumes, newest first
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Resume>>;

    async fn get(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<Resume>;

    /// Delete a resume with its analysis, matches and stored file
    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<()>;

    /// Run the analysis engine and store the result, replacing any earlier one
    async fn analyze(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<ResumeAnalysis>;

    async fn get_analysis(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<ResumeAnalysis>;
}

pub struct ResumeManager<U: UnitOfWork> {
    uow: Arc<U>,
    storage: Arc<dyn FileStorage>,
    max_upload_bytes: usize,
}

impl<U: UnitOfWork> ResumeManager<U> {
    pub fn new(uow: Arc<U>, storage: Arc<dyn FileStorage>, max_upload_bytes: usize) -> Self {
        Self {
            uow,
            storage,
            max_upload_bytes,
        }
    }

    async fn owned(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<Resume> {
        self.uow
            .resumes()
            .find_for_user(resume_id, user_id)
            .await?
            .ok_or_not_found()
    }
}

/// Keep only the final path component; some browsers send full paths.
fn clean_filename(raw: &str, file_type: FileType) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() {
        format!("resume.{}", file_type.extension())
    } else {
        name.to_string()
    }
}

#[async_trait]
impl<U: UnitOfWork> ResumeService for ResumeManager<U> {
    async fn upload(&self, user_id: Uuid, file: UploadedFile) -> AppResult<Resume> {
        let file_type = FileType::detect(&file.filename, file.content_type.as_deref())
            .ok_or_else(|| {
                AppError::UnsupportedMediaType("Only PDF and DOCX files are supported".into())
            })?;

        if file.bytes.is_empty() {
            return Err(AppError::bad_request("Uploaded file is empty"));
        }
        if file.bytes.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the maximum size of {} bytes",
                self.max_upload_bytes
            )));
        }

        let bytes = file.bytes.clone();
        let text = tokio::task::spawn_blocking(move || analysis::extract_text(file_type, &bytes))
            .await
            .map_err(|e| AppError::internal(format!("Extraction task failed: {}", e)))??;

        if text.trim().is_empty() {
            return Err(AppError::bad_request(
                "No text could be extracted from the document",
            ));
        }

        let resume_id = Uuid::new_v4();
        let key = storage_key(user_id, resume_id, file_type);
        let file_size = file.bytes.len() as i64;
        self.storage.put(&key, file.bytes).await?;

        let new_resume = NewResume {
            id: resume_id,
            user_id,
            filename: clean_filename(&file.filename, file_type),
            file_type,
            file_size,
            storage_key: key.clone(),
            content_text: text,
        };

        let resume = match self.uow.resumes().create(new_resume).await {
            Ok(resume) => resume,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&key).await {
                    tracing::warn!(key = %key, error = %cleanup, "Failed to remove orphaned file");
                }
                return Err(e);
            }
        };

        tracing::info!(
            resume_id = %resume.id,
            user_id = %user_id,
            file_type = %file_type,
            size = file_size,
            "Resume uploaded"
        );
        Ok(resume)
    }

    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Resume>> {
        self.uow.resumes().list_for_user(user_id).await
    }

    async fn get(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<Resume> {
        self.owned(user_id, resume_id).await
    }

    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<()> {
        let resume = self.owned(user_id, resume_id).await?;

        with_transaction!(self.uow, |ctx| {
            ctx.resumes()
                .delete_with_dependents(resume_id, user_id)
                .await
        })?;

        // The rows are gone; a leftover file only wastes space
        if let Err(e) = self.storage.delete(&resume.storage_key).await {
            tracing::warn!(key = %resume.storage_key, error = %e, "Failed to delete resume file");
        }

        tracing::info!(resume_id = %resume_id, "Resume deleted");
        Ok(())
    }

    async fn analyze(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<ResumeAnalysis> {
        let resume = self.owned(user_id, resume_id).await?;

        let report = tokio::task::spawn_blocking(move || analysis::analyze(&resume.content_text))
            .await
            .map_err(|e| AppError::internal(format!("Analysis task failed: {}", e)))?;

        let stored = self.uow.analyses().upsert(resume_id, report).await?;
        tracing::info!(
            resume_id = %resume_id,
            ats_score = stored.report.ats_score,
            "Resume analyzed"
        );
        Ok(stored)
    }

    async fn get_analysis(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<ResumeAnalysis> {
        self.owned(user_id, resume_id).await?;
        self.uow
            .analyses()
            .find_by_resume(resume_id)
            .await?
            .ok_or_not_found()
    }
}
