//! Resume to job description comparison results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Output of the matcher, before it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub match_score: f64,
    pub overlapping_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JobMatch {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub report: MatchReport,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJobMatch {
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub report: MatchReport,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobMatchResponse {
    pub id: Uuid,
    pub resume_id: Uuid,
    #[schema(example = "Backend Engineer")]
    pub job_title: String,
    /// Share of the job's requirements covered by the resume (0-100)
    #[schema(example = 64.3)]
    pub match_score: f64,
    pub overlapping_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<JobMatch> for JobMatchResponse {
    fn from(m: JobMatch) -> Self {
        Self {
            id: m.id,
            resume_id: m.resume_id,
            job_title: m.job_title,
            match_score: m.report.match_score,
            overlapping_skills: m.report.overlapping_skills,
            missing_skills: m.report.missing_skills,
            suggestions: m.report.suggestions,
            created_at: m.created_at,
        }
    }
}
