//! Domain layer - core entities and value objects.
//!
//! Nothing here touches the database, the filesystem or HTTP.

pub mod analysis;
pub mod job_match;
pub mod password;
pub mod resume;
pub mod user;

pub use analysis::{AnalysisReport, Feedback, ResumeAnalysis, ResumeAnalysisResponse};
pub use job_match::{JobMatch, JobMatchResponse, MatchReport, NewJobMatch};
pub use password::Password;
pub use resume::{storage_key, FileType, NewResume, Resume, ResumeResponse};
pub use user::{normalize_email, User, UserResponse};
