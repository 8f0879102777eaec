//! Repository layer - data access behind traits.

pub(crate) mod entities;
mod analysis_repository;
mod job_match_repository;
mod resume_repository;
mod user_repository;

pub use analysis_repository::{AnalysisRepository, AnalysisStore};
pub use job_match_repository::{JobMatchRepository, JobMatchStore};
pub use resume_repository::{ResumeRepository, ResumeStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use analysis_repository::MockAnalysisRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use job_match_repository::MockJobMatchRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use resume_repository::MockResumeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
