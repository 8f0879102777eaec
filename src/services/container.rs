//! Service Container - centralized service access.
//!
//! Handlers depend on the service traits only; `Services` wires the
//! database-backed implementations together.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, JobMatchService, JobMatcher, ResumeManager, ResumeService,
};
use crate::config::Config;
use crate::infra::{FileStorage, Persistence};

pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn resumes(&self) -> Arc<dyn ResumeService>;

    fn job_matches(&self) -> Arc<dyn JobMatchService>;
}

pub struct Services {
    auth_service: Arc<dyn AuthService>,
    resume_service: Arc<dyn ResumeService>,
    job_match_service: Arc<dyn JobMatchService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        resume_service: Arc<dyn ResumeService>,
        job_match_service: Arc<dyn JobMatchService>,
    ) -> Self {
        Self {
            auth_service,
            resume_service,
            job_match_service,
        }
    }

    /// Build every service over one shared Unit of Work
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Arc<Config>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let max_upload_bytes = config.max_upload_bytes;

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            resume_service: Arc::new(ResumeManager::new(uow.clone(), storage, max_upload_bytes)),
            job_match_service: Arc::new(JobMatcher::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn resumes(&self) -> Arc<dyn ResumeService> {
        self.resume_service.clone()
    }

    fn job_matches(&self) -> Arc<dyn JobMatchService> {
        self.job_match_service.clone()
    }
}
