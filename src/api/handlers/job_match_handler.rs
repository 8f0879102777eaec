//! Job matching handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::JobMatchResponse;
use crate::errors::AppResult;
use crate::types::{JobMatchPage, Paginated, PaginationParams};

/// Job description to compare a resume against
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MatchRequest {
    #[validate(length(min = 1, message = "Job title is required"))]
    #[schema(example = "Backend Engineer")]
    pub job_title: String,
    /// At least 50 characters
    #[validate(length(min = 50, message = "Job description must be at least 50 characters"))]
    #[schema(min_length = 50)]
    pub job_description: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Only matches for this resume
    pub resume_id: Option<Uuid>,
    /// 1-based page number
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

pub fn job_match_routes() -> Router<AppState> {
    Router::new()
        .route("/match/:resume_id", post(match_resume))
        .route("/matches", get(match_history))
}

/// Match a resume against a job description
#[utoipa::path(
    post,
    path = "/api/job/match/{resume_id}",
    tag = "job matching",
    params(("resume_id" = Uuid, Path, description = "Resume ID")),
    request_body = MatchRequest,
    responses(
        (status = 200, description = "Match result", body = JobMatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Resume not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn match_resume(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(resume_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<MatchRequest>,
) -> AppResult<Json<JobMatchResponse>> {
    let job_match = state
        .job_match_service
        .match_resume(
            current_user.id,
            resume_id,
            payload.job_title,
            payload.job_description,
        )
        .await?;

    Ok(Json(JobMatchResponse::from(job_match)))
}

/// The caller's match history, newest first
#[utoipa::path(
    get,
    path = "/api/job/matches",
    tag = "job matching",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Match history", body = JobMatchPage),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn match_history(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Paginated<JobMatchResponse>>> {
    let params = PaginationParams::new(query.page, query.per_page);
    let (matches, total) = state
        .job_match_service
        .history(current_user.id, query.resume_id, params)
        .await?;

    let data = matches.into_iter().map(JobMatchResponse::from).collect();
    Ok(Json(Paginated::new(data, params, total)))
}
