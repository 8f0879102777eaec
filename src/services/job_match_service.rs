//! Job match service - compares a stored resume against a job description.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::analysis;
use crate::config::MIN_JOB_DESCRIPTION_LENGTH;
use crate::domain::{JobMatch, NewJobMatch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait JobMatchService: Send + Sync {
    /// Score a resume against a job description and record the result
    async fn match_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        job_title: String,
        job_description: String,
    ) -> AppResult<JobMatch>;

    /// Match history, newest first, optionally for one resume
    async fn history(
        &self,
        user_id: Uuid,
        resume_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<JobMatch>, u64)>;
}

pub struct JobMatcher<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> JobMatcher<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> JobMatchService for JobMatcher<U> {
    async fn match_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        job_title: String,
        job_description: String,
    ) -> AppResult<JobMatch> {
        let job_title = job_title.trim().to_string();
        let job_description = job_description.trim().to_string();

        if job_title.is_empty() {
            return Err(AppError::validation("Job title is required"));
        }
        if (job_description.chars().count() as u64) < MIN_JOB_DESCRIPTION_LENGTH {
            return Err(AppError::validation(format!(
                "Job description must be at least {} characters",
                MIN_JOB_DESCRIPTION_LENGTH
            )));
        }

        let resume = self
            .uow
            .resumes()
            .find_for_user(resume_id, user_id)
            .await?
            .ok_or_not_found()?;

        let description = job_description.clone();
        let report = tokio::task::spawn_blocking(move || {
            analysis::match_resume(&resume.content_text, &description)
        })
        .await
        .map_err(|e| AppError::internal(format!("Matching task failed: {}", e)))?;

        let job_match = self
            .uow
            .job_matches()
            .create(NewJobMatch {
                resume_id,
                user_id,
                job_title,
                job_description,
                report,
            })
            .await?;

        tracing::info!(
            match_id = %job_match.id,
            resume_id = %resume_id,
            score = job_match.report.match_score,
            "Job match recorded"
        );
        Ok(job_match)
    }

    async fn history(
        &self,
        user_id: Uuid,
        resume_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<JobMatch>, u64)> {
        self.uow
            .job_matches()
            .list_for_user(user_id, resume_id, params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{storage_key, FileType, Resume};
    use crate::infra::{MockJobMatchRepository, MockResumeRepository};
    use crate::services::test_support::TestUnitOfWork;
    use chrono::Utc;

    const DESCRIPTION: &str = "We need a backend engineer experienced with Python, \
        PostgreSQL and Kubernetes to build data pipelines.";

    fn matcher(
        resumes: MockResumeRepository,
        job_matches: MockJobMatchRepository,
    ) -> JobMatcher<TestUnitOfWork> {
        let uow = TestUnitOfWork::builder()
            .resumes(resumes)
            .job_matches(job_matches)
            .build();
        JobMatcher::new(Arc::new(uow))
    }

    fn resume_with(user_id: Uuid, id: Uuid, text: &str) -> Resume {
        Resume {
            id,
            user_id,
            filename: "cv.pdf".into(),
            file_type: FileType::Pdf,
            file_size: 2048,
            storage_key: storage_key(user_id, id, FileType::Pdf),
            content_text: text.into(),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_match_persists_partitioned_skills() {
        let (user_id, resume_id) = (Uuid::new_v4(), Uuid::new_v4());
        let resume = resume_with(user_id, resume_id, "Built ETL jobs in Python on PostgreSQL");

        let mut resumes = MockResumeRepository::new();
        resumes
            .expect_find_for_user()
            .returning(move |_, _| Ok(Some(resume.clone())));

        let mut job_matches = MockJobMatchRepository::new();
        job_matches
            .expect_create()
            .withf(|new| new.job_title == "Backend Engineer")
            .times(1)
            .returning(|new| {
                Ok(JobMatch {
                    id: Uuid::new_v4(),
                    resume_id: new.resume_id,
                    user_id: new.user_id,
                    job_title: new.job_title,
                    job_description: new.job_description,
                    report: new.report,
                    created_at: Utc::now(),
                })
            });

        let result = matcher(resumes, job_matches)
            .match_resume(
                user_id,
                resume_id,
                "  Backend Engineer ".into(),
                DESCRIPTION.into(),
            )
            .await
            .unwrap();

        assert_eq!(result.report.overlapping_skills, vec!["Python", "PostgreSQL"]);
        assert_eq!(result.report.missing_skills, vec!["Kubernetes"]);
        assert!(result.report.match_score > 0.0 && result.report.match_score < 100.0);
    }

    #[tokio::test]
    async fn test_short_description_rejected() {
        let mut resumes = MockResumeRepository::new();
        resumes.expect_find_for_user().never();

        let result = matcher(resumes, MockJobMatchRepository::new())
            .match_resume(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "Engineer".into(),
                "   too short   ".into(),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let result = matcher(MockResumeRepository::new(), MockJobMatchRepository::new())
            .match_resume(Uuid::new_v4(), Uuid::new_v4(), "  ".into(), DESCRIPTION.into())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_match_against_foreign_resume_is_not_found() {
        let mut resumes = MockResumeRepository::new();
        resumes.expect_find_for_user().returning(|_, _| Ok(None));
        let mut job_matches = MockJobMatchRepository::new();
        job_matches.expect_create().never();

        let result = matcher(resumes, job_matches)
            .match_resume(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "Engineer".into(),
                DESCRIPTION.into(),
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_history_passes_filter_through() {
        let (user_id, resume_id) = (Uuid::new_v4(), Uuid::new_v4());
        let mut job_matches = MockJobMatchRepository::new();
        job_matches
            .expect_list_for_user()
            .withf(move |user, resume, params| {
                *user == user_id && *resume == Some(resume_id) && params.page == 2
            })
            .returning(|_, _, _| Ok((vec![], 0)));

        let params = PaginationParams {
            page: 2,
            per_page: 10,
        };
        let (items, total) = matcher(MockResumeRepository::new(), job_matches)
            .history(user_id, Some(resume_id), params)
            .await
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(total, 0);
    }
}
