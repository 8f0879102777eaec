//! Unit of Work over mocked repositories, for service tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{
    AnalysisRepository, JobMatchRepository, MockAnalysisRepository, MockJobMatchRepository,
    MockResumeRepository, MockUserRepository, ResumeRepository, TransactionContext, UnitOfWork,
    UserRepository,
};

pub fn test_config() -> Config {
    Config::new("test-secret-key-for-testing-only-32chars").unwrap()
}

pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    resumes: Arc<MockResumeRepository>,
    analyses: Arc<MockAnalysisRepository>,
    job_matches: Arc<MockJobMatchRepository>,
}

impl TestUnitOfWork {
    pub fn builder() -> TestUnitOfWorkBuilder {
        TestUnitOfWorkBuilder::default()
    }
}

/// Repositories left unset get a mock with no expectations.
#[derive(Default)]
pub struct TestUnitOfWorkBuilder {
    users: Option<MockUserRepository>,
    resumes: Option<MockResumeRepository>,
    analyses: Option<MockAnalysisRepository>,
    job_matches: Option<MockJobMatchRepository>,
}

impl TestUnitOfWorkBuilder {
    pub fn users(mut self, repo: MockUserRepository) -> Self {
        self.users = Some(repo);
        self
    }

    pub fn resumes(mut self, repo: MockResumeRepository) -> Self {
        self.resumes = Some(repo);
        self
    }

    pub fn analyses(mut self, repo: MockAnalysisRepository) -> Self {
        self.analyses = Some(repo);
        self
    }

    pub fn job_matches(mut self, repo: MockJobMatchRepository) -> Self {
        self.job_matches = Some(repo);
        self
    }

    pub fn build(self) -> TestUnitOfWork {
        TestUnitOfWork {
            users: Arc::new(self.users.unwrap_or_default()),
            resumes: Arc::new(self.resumes.unwrap_or_default()),
            analyses: Arc::new(self.analyses.unwrap_or_default()),
            job_matches: Arc::new(self.job_matches.unwrap_or_default()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn resumes(&self) -> Arc<dyn ResumeRepository> {
        self.resumes.clone()
    }

    fn analyses(&self) -> Arc<dyn AnalysisRepository> {
        self.analyses.clone()
    }

    fn job_matches(&self) -> Arc<dyn JobMatchRepository> {
        self.job_matches.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
