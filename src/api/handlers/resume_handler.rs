//! Resume upload, retrieval and analysis handlers.

use axum::{
    extract::{
        multipart::{Multipart, MultipartError},
        DefaultBodyLimit, Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{MULTIPART_OVERHEAD_BYTES, UPLOAD_FIELD_NAME};
use crate::domain::{ResumeAnalysisResponse, ResumeResponse};
use crate::errors::{AppError, AppResult};
use crate::services::UploadedFile;
use crate::types::{Created, NoContent};

/// Multipart upload form
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// PDF or DOCX file
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Resume routes. The upload body limit leaves room for multipart framing
/// on top of the file size limit.
pub fn resume_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(
                max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route("/", get(list_resumes))
        .route("/:id", get(get_resume).delete(delete_resume))
        .route("/:id/analysis", get(get_analysis))
        .route("/analyze/:id", post(analyze_resume))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Uploaded file is too large".into())
    } else {
        AppError::bad_request(e.body_text())
    }
}

/// Upload a resume
#[utoipa::path(
    post,
    path = "/api/resume/upload",
    tag = "resume",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Resume stored", body = ResumeResponse),
        (status = 400, description = "Empty file or no extractable text"),
        (status = 401, description = "Missing or invalid token"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Not a PDF or DOCX file")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<Created<ResumeResponse>> {
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        file = Some(UploadedFile {
            filename,
            content_type,
            bytes,
        });
        break;
    }

    let file = file.ok_or_else(|| {
        AppError::bad_request(format!("Missing '{}' field", UPLOAD_FIELD_NAME))
    })?;

    let resume = state.resume_service.upload(current_user.id, file).await?;
    Ok(Created(ResumeResponse::from(resume)))
}

/// List the caller's resumes, newest first
#[utoipa::path(
    get,
    path = "/api/resume",
    tag = "resume",
    responses(
        (status = 200, description = "Resumes", body = [ResumeResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_resumes(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ResumeResponse>>> {
    let resumes = state.resume_service.list(current_user.id).await?;
    Ok(Json(resumes.into_iter().map(ResumeResponse::from).collect()))
}

/// Get one resume
#[utoipa::path(
    get,
    path = "/api/resume/{id}",
    tag = "resume",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume", body = ResumeResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Resume not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_resume(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ResumeResponse>> {
    let resume = state.resume_service.get(current_user.id, id).await?;
    Ok(Json(ResumeResponse::from(resume)))
}

/// Delete a resume with its analysis and job matches
#[utoipa::path(
    delete,
    path = "/api/resume/{id}",
    tag = "resume",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 204, description = "Resume deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Resume not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_resume(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.resume_service.delete(current_user.id, id).await?;
    Ok(NoContent)
}

/// Analyze a resume, replacing any earlier analysis
#[utoipa::path(
    post,
    path = "/api/resume/analyze/{id}",
    tag = "resume",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Analysis result", body = ResumeAnalysisResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Resume not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn analyze_resume(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ResumeAnalysisResponse>> {
    let analysis = state.resume_service.analyze(current_user.id, id).await?;
    Ok(Json(ResumeAnalysisResponse::from(analysis)))
}

/// Get the stored analysis of a resume
#[utoipa::path(
    get,
    path = "/api/resume/{id}/analysis",
    tag = "resume",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Stored analysis", body = ResumeAnalysisResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Resume not found or not analyzed yet")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ResumeAnalysisResponse>> {
    let analysis = state.resume_service.get_analysis(current_user.id, id).await?;
    Ok(Json(ResumeAnalysisResponse::from(analysis)))
}
