//! Resume analysis results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// What the resume does well and where it falls short.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Output of the analysis engine, before it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub ats_score: f64,
    pub grammar_score: f64,
    pub formatting_score: f64,
    pub keyword_score: f64,
    pub skills: Vec<String>,
    pub feedback: Feedback,
    pub suggestions: Vec<String>,
}

/// Stored analysis. One per resume.
#[derive(Debug, Clone)]
pub struct ResumeAnalysis {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub report: AnalysisReport,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResumeAnalysisResponse {
    pub resume_id: Uuid,
    /// Weighted overall score (0-100)
    #[schema(example = 72.4)]
    pub ats_score: f64,
    #[schema(example = 88.0)]
    pub grammar_score: f64,
    #[schema(example = 70.0)]
    pub formatting_score: f64,
    #[schema(example = 61.5)]
    pub keyword_score: f64,
    /// Detected skills, in order of first appearance
    pub skills: Vec<String>,
    pub feedback: Feedback,
    pub suggestions: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl From<ResumeAnalysis> for ResumeAnalysisResponse {
    fn from(analysis: ResumeAnalysis) -> Self {
        let report = analysis.report;
        Self {
            resume_id: analysis.resume_id,
            ats_score: report.ats_score,
            grammar_score: report.grammar_score,
            formatting_score: report.formatting_score,
            keyword_score: report.keyword_score,
            skills: report.skills,
            feedback: report.feedback,
            suggestions: report.suggestions,
            analyzed_at: analysis.analyzed_at,
        }
    }
}
