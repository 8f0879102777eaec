//! Infrastructure layer - external systems integration.
//!
//! Database, Redis, file storage and the Unit of Work that ties the
//! repositories together.

pub mod cache;
pub mod db;
pub mod health;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use cache::{Cache, RateLimiter};
pub use db::{Database, Migrator};
pub use health::{HealthProbe, StorageHealth};
pub use repositories::{
    AnalysisRepository, JobMatchRepository, ResumeRepository, UserRepository,
};
pub use storage::{FileStorage, FilesystemBackend};
pub use unit_of_work::{Persistence, TransactionContext, TxResumeRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockRateLimiter;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAnalysisRepository, MockJobMatchRepository, MockResumeRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockFileStorage;
