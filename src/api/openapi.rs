//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/swagger-ui`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, health_handler, job_match_handler, resume_handler};
use crate::config::Config;
use crate::domain::{
    Feedback, FileType, JobMatchResponse, ResumeAnalysisResponse, ResumeResponse, UserResponse,
};
use crate::services::TokenResponse;
use crate::types::{JobMatchPage, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Resume Analyzer",
        version = "1.0.0",
        description = "Resume parsing, ATS-style scoring and job description matching"
    ),
    paths(
        health_handler::root,
        health_handler::health,
        health_handler::readiness,
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        resume_handler::upload,
        resume_handler::list_resumes,
        resume_handler::get_resume,
        resume_handler::delete_resume,
        resume_handler::analyze_resume,
        resume_handler::get_analysis,
        job_match_handler::match_resume,
        job_match_handler::match_history,
    ),
    components(
        schemas(
            UserResponse,
            FileType,
            ResumeResponse,
            Feedback,
            ResumeAnalysisResponse,
            JobMatchResponse,
            JobMatchPage,
            PaginationMeta,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            resume_handler::UploadForm,
            job_match_handler::MatchRequest,
            health_handler::RootResponse,
            health_handler::HealthResponse,
            health_handler::ReadinessResponse,
            health_handler::ProbeStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service status"),
        (name = "authentication", description = "Registration, login and the current user"),
        (name = "resume", description = "Resume upload and analysis"),
        (name = "job matching", description = "Resume to job description matching")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document titled with the configured name and version
pub fn api_doc(config: &Config) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.app_name.clone();
    doc.info.version = config.app_version.clone();
    doc
}

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
