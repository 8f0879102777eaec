//! Application state - dependency injection container.
//!
//! Handlers see services and infrastructure through trait objects only.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{
    Cache, Database, FileStorage, FilesystemBackend, HealthProbe, RateLimiter, StorageHealth,
};
use crate::services::{
    AuthService, JobMatchService, ResumeService, ServiceContainer, Services,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: Arc<dyn AuthService>,
    pub resume_service: Arc<dyn ResumeService>,
    pub job_match_service: Arc<dyn JobMatchService>,
    /// Backs both the general and the auth rate limits
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Dependencies checked by the readiness endpoint
    pub probes: Vec<Arc<dyn HealthProbe>>,
}

impl AppState {
    /// Wire the production services over Postgres, Redis and the upload directory.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: Arc<Config>) -> Self {
        let storage: Arc<dyn FileStorage> =
            Arc::new(FilesystemBackend::new(config.upload_dir.clone()));
        let container =
            Services::from_connection(database.get_connection(), config.clone(), storage.clone());

        let db_probe: Arc<dyn HealthProbe> = database;
        let cache_probe: Arc<dyn HealthProbe> = cache.clone();
        let storage_check: Arc<dyn HealthProbe> = Arc::new(StorageHealth::new(storage));
        Self::new(
            config,
            &container,
            cache,
            vec![db_probe, cache_probe, storage_check],
        )
    }

    /// Build state from an arbitrary service container.
    pub fn new(
        config: Arc<Config>,
        services: &dyn ServiceContainer,
        rate_limiter: Arc<dyn RateLimiter>,
        probes: Vec<Arc<dyn HealthProbe>>,
    ) -> Self {
        Self {
            config,
            auth_service: services.auth(),
            resume_service: services.resumes(),
            job_match_service: services.job_matches(),
            rate_limiter,
            probes,
        }
    }
}
