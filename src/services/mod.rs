//! Application services layer - use cases and business logic.
//!
//! Services orchestrate the analysis engine, storage and repositories.
//! They reach the database through the Unit of Work.

mod auth_service;
pub mod container;
mod job_match_service;
mod resume_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use job_match_service::{JobMatchService, JobMatcher};
pub use resume_service::{ResumeManager, ResumeService, UploadedFile};
