//! Integration tests for API endpoints.
//!
//! The router runs against hand-written service stubs, so no database or
//! Redis is needed.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use resume_analyzer::api::{create_app, AppState};
use resume_analyzer::config::Config;
use resume_analyzer::domain::{
    AnalysisReport, Feedback, FileType, JobMatch, MatchReport, Resume, ResumeAnalysis, User,
};
use resume_analyzer::errors::{AppError, AppResult};
use resume_analyzer::infra::{HealthProbe, RateLimiter};
use resume_analyzer::services::{
    AuthService, Claims, JobMatchService, ResumeService, Services, TokenResponse, UploadedFile,
};
use resume_analyzer::types::PaginationParams;

const VALID_TOKEN: &str = "valid-test-token";
const APP_NAME: &str = "Resume Analyzer Test";
const MAX_UPLOAD: usize = 1024;

fn user_id() -> Uuid {
    Uuid::from_u128(0x1111)
}

fn own_resume_id() -> Uuid {
    Uuid::from_u128(0x2222)
}

// =============================================================================
// Service stubs
// =============================================================================

struct StubAuth;

#[async_trait]
impl AuthService for StubAuth {
    async fn register(&self, email: String, _password: String, name: String) -> AppResult<User> {
        if email == "taken@example.com" {
            return Err(AppError::conflict("User"));
        }
        Ok(User::new(Uuid::new_v4(), email, "hashed".into(), name))
    }

    async fn login(&self, _email: String, password: String) -> AppResult<TokenResponse> {
        if password != "password123" {
            return Err(AppError::InvalidCredentials);
        }
        Ok(TokenResponse {
            access_token: VALID_TOKEN.into(),
            token_type: "Bearer".into(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token != VALID_TOKEN {
            return Err(AppError::Unauthorized);
        }
        Ok(Claims {
            sub: user_id(),
            email: "jane@example.com".into(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }

    async fn current_user(&self, user_id: Uuid) -> AppResult<User> {
        Ok(User::new(
            user_id,
            "jane@example.com".into(),
            "hashed".into(),
            "Jane".into(),
        ))
    }
}

fn stored_resume(id: Uuid, filename: &str, size: i64) -> Resume {
    Resume {
        id,
        user_id: user_id(),
        filename: filename.into(),
        file_type: FileType::Pdf,
        file_size: size,
        storage_key: format!("{}/{}.pdf", user_id(), id),
        content_text: "Jane Doe\nPython developer".into(),
        uploaded_at: Utc::now(),
    }
}

/// Knows a single resume owned by the test user.
struct StubResumes;

impl StubResumes {
    fn owned(user: Uuid, id: Uuid) -> AppResult<Resume> {
        if user == user_id() && id == own_resume_id() {
            Ok(stored_resume(id, "cv.pdf", 2048))
        } else {
            Err(AppError::NotFound)
        }
    }
}

#[async_trait]
impl ResumeService for StubResumes {
    async fn upload(&self, _user_id: Uuid, file: UploadedFile) -> AppResult<Resume> {
        if file.filename.ends_with(".png") {
            return Err(AppError::UnsupportedMediaType(
                "Only PDF and DOCX files are supported".into(),
            ));
        }
        Ok(stored_resume(
            Uuid::new_v4(),
            &file.filename,
            file.bytes.len() as i64,
        ))
    }

    async fn list(&self, _user_id: Uuid) -> AppResult<Vec<Resume>> {
        Ok(vec![stored_resume(own_resume_id(), "cv.pdf", 2048)])
    }

    async fn get(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<Resume> {
        Self::owned(user_id, resume_id)
    }

    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<()> {
        Self::owned(user_id, resume_id).map(|_| ())
    }

    async fn analyze(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<ResumeAnalysis> {
        Self::owned(user_id, resume_id)?;
        Ok(ResumeAnalysis {
            id: Uuid::new_v4(),
            resume_id,
            report: AnalysisReport {
                ats_score: 71.5,
                grammar_score: 90.0,
                formatting_score: 65.0,
                keyword_score: 62.0,
                skills: vec!["Python".into()],
                feedback: Feedback {
                    strengths: vec!["Clear contact details".into()],
                    weaknesses: vec!["Few action verbs".into()],
                },
                suggestions: vec!["Quantify your achievements".into()],
            },
            analyzed_at: Utc::now(),
        })
    }

    async fn get_analysis(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<ResumeAnalysis> {
        Self::owned(user_id, resume_id)?;
        Err(AppError::NotFound)
    }
}

struct StubJobMatches;

#[async_trait]
impl JobMatchService for StubJobMatches {
    async fn match_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        job_title: String,
        job_description: String,
    ) -> AppResult<JobMatch> {
        StubResumes::owned(user_id, resume_id)?;
        Ok(JobMatch {
            id: Uuid::new_v4(),
            resume_id,
            user_id,
            job_title,
            job_description,
            report: MatchReport {
                match_score: 58.0,
                overlapping_skills: vec!["Python".into()],
                missing_skills: vec!["Kubernetes".into()],
                suggestions: vec![
                    "Add Kubernetes to your resume if you have experience with it".into(),
                ],
            },
            created_at: Utc::now(),
        })
    }

    async fn history(
        &self,
        _user_id: Uuid,
        _resume_id: Option<Uuid>,
        _params: PaginationParams,
    ) -> AppResult<(Vec<JobMatch>, u64)> {
        Ok((vec![], 0))
    }
}

struct AllowAll;

#[async_trait]
impl RateLimiter for AllowAll {
    async fn check_rate_limit(&self, _identifier: &str, _max: u64, _window: u64) -> AppResult<(u64, bool)> {
        Ok((1, true))
    }
}

/// Behaves like an unreachable Redis.
struct BrokenLimiter;

#[async_trait]
impl RateLimiter for BrokenLimiter {
    async fn check_rate_limit(&self, _identifier: &str, _max: u64, _window: u64) -> AppResult<(u64, bool)> {
        Err(AppError::internal("connection refused"))
    }
}

struct StubProbe {
    name: &'static str,
    up: bool,
}

#[async_trait]
impl HealthProbe for StubProbe {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self) -> Result<(), String> {
        if self.up {
            Ok(())
        } else {
            Err("connection refused".into())
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn state_with(rate_limiter: Arc<dyn RateLimiter>, redis_up: bool) -> AppState {
    let mut config = Config::new("test-secret-key-for-testing-only-32chars").unwrap();
    config.app_name = APP_NAME.into();
    config.max_upload_bytes = MAX_UPLOAD;

    let services = Services::new(
        Arc::new(StubAuth),
        Arc::new(StubResumes),
        Arc::new(StubJobMatches),
    );
    let probes: Vec<Arc<dyn HealthProbe>> = vec![
        Arc::new(StubProbe {
            name: "database",
            up: true,
        }),
        Arc::new(StubProbe {
            name: "redis",
            up: redis_up,
        }),
    ];

    AppState::new(Arc::new(config), &services, rate_limiter, probes)
}

async fn send(request: Request<Body>) -> Response {
    send_with(state_with(Arc::new(AllowAll), true), request).await
}

async fn send_with(state: AppState, request: Request<Body>) -> Response {
    create_app(state).oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn authed(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
}

fn json_request(method: Method, uri: &str, body: Value, token: bool) -> Request<Body> {
    let builder = if token {
        authed(method, uri)
    } else {
        Request::builder().method(method).uri(uri)
    };
    builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let boundary = "X-RESUME-BOUNDARY";
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"{n}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        b = boundary,
        f = field,
        n = filename
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    authed(Method::POST, "/api/resume/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// Root, health and OPTIONS
// =============================================================================

#[tokio::test]
async fn test_root_payload() {
    let response = send(get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "AI Resume Analyzer API", "version": "1.0.0" })
    );
}

#[tokio::test]
async fn test_health_reports_configured_name() {
    let response = send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "healthy", "service": APP_NAME })
    );
}

#[tokio::test]
async fn test_readiness_healthy() {
    let response = send(get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
    assert_eq!(body["checks"]["redis"]["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_degraded_when_probe_fails() {
    let state = state_with(Arc::new(AllowAll), false);
    let response = send_with(state, get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["redis"]["status"], "unhealthy");
    assert_eq!(body["checks"]["redis"]["error"], "connection refused");
}

#[tokio::test]
async fn test_options_any_path_ok() {
    for uri in ["/", "/some/unknown/path", "/api/resume/upload"] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::OK, "OPTIONS {}", uri);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/resume")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();

    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_options_with_origin_but_no_preflight_ok() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/job/match")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let response = send(get("/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let response = send(get("/api-docs/openapi.json")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["info"]["title"], APP_NAME);
    assert!(body["paths"]["/api/job/match/{resume_id}"].is_object());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_created() {
    let request = json_request(
        Method::POST,
        "/api/auth/register",
        json!({ "name": "Jane", "email": "jane@example.com", "password": "password123" }),
        false,
    );
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["email"], "jane@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_validation_errors() {
    let request = json_request(
        Method::POST,
        "/api/auth/register",
        json!({ "name": "Jane", "email": "not-an-email", "password": "short" }),
        false,
    );
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["detail"], body["error"]["message"]);
}

#[tokio::test]
async fn test_register_duplicate_conflicts() {
    let request = json_request(
        Method::POST,
        "/api/auth/register",
        json!({ "name": "Jane", "email": "taken@example.com", "password": "password123" }),
        false,
    );
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_returns_token() {
    let request = json_request(
        Method::POST,
        "/api/auth/login",
        json!({ "email": "jane@example.com", "password": "password123" }),
        false,
    );
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["X-RateLimit-Limit"], "10");

    let body = body_json(response).await;
    assert_eq!(body["access_token"], VALID_TOKEN);
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let request = json_request(
        Method::POST,
        "/api/auth/login",
        json!({ "email": "jane@example.com", "password": "wrong-password" }),
        false,
    );
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["detail"], "Invalid credentials");
}

#[tokio::test]
async fn test_me_requires_token() {
    let response = send(get("/api/auth/me")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = authed(Method::GET, "/api/auth/me").body(Body::empty()).unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], user_id().to_string());
}

#[tokio::test]
async fn test_rate_limiter_failure_fails_closed() {
    let state = state_with(Arc::new(BrokenLimiter), true);
    let request = json_request(
        Method::POST,
        "/api/auth/login",
        json!({ "email": "jane@example.com", "password": "password123" }),
        false,
    );
    let response = send_with(state, request).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["Retry-After"], "60");
}

// =============================================================================
// Resumes
// =============================================================================

#[tokio::test]
async fn test_resume_routes_require_token() {
    for uri in ["/api/resume", "/api/job/matches"] {
        let response = send(get(uri)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);
    }

    let request = Request::get("/api/resume")
        .header(header::AUTHORIZATION, "Bearer forged")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(request).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_resumes_with_trailing_slash() {
    for uri in ["/api/resume", "/api/resume/"] {
        let request = authed(Method::GET, uri).body(Body::empty()).unwrap();
        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);

        let body = body_json(response).await;
        assert_eq!(body[0]["filename"], "cv.pdf");
        assert_eq!(body[0]["file_type"], "pdf");
        assert!(body[0].get("content_text").is_none());
    }
}

#[tokio::test]
async fn test_foreign_resume_not_found() {
    let uri = format!("/api/resume/{}", Uuid::new_v4());
    let request = authed(Method::GET, &uri).body(Body::empty()).unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "Resource not found");
}

#[tokio::test]
async fn test_delete_resume_no_content() {
    let uri = format!("/api/resume/{}", own_resume_id());
    let request = authed(Method::DELETE, &uri).body(Body::empty()).unwrap();
    assert_eq!(send(request).await.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_upload_multipart_created() {
    let response = send(multipart_request("file", "cv.pdf", b"%PDF-1.4 test")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["filename"], "cv.pdf");
    assert_eq!(body["file_size"], 13);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let response = send(multipart_request("attachment", "cv.pdf", b"data")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_unsupported_type() {
    let response = send(multipart_request("file", "photo.png", b"\x89PNG")).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_upload_body_over_limit() {
    let oversized = vec![b'a'; MAX_UPLOAD + 128 * 1024];
    let response = send(multipart_request("file", "cv.pdf", &oversized)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_analyze_resume() {
    let uri = format!("/api/resume/analyze/{}", own_resume_id());
    let request = authed(Method::POST, &uri).body(Body::empty()).unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["resume_id"], own_resume_id().to_string());
    assert_eq!(body["ats_score"], 71.5);
    assert_eq!(body["feedback"]["weaknesses"][0], "Few action verbs");
}

#[tokio::test]
async fn test_analysis_missing_is_not_found() {
    let uri = format!("/api/resume/{}/analysis", own_resume_id());
    let request = authed(Method::GET, &uri).body(Body::empty()).unwrap();
    assert_eq!(send(request).await.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Job matching
// =============================================================================

#[tokio::test]
async fn test_match_resume() {
    let uri = format!("/api/job/match/{}", own_resume_id());
    let request = json_request(
        Method::POST,
        &uri,
        json!({
            "job_title": "Backend Engineer",
            "job_description": "Backend engineer with Python and Kubernetes experience for our platform team."
        }),
        true,
    );
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["match_score"], 58.0);
    assert_eq!(body["missing_skills"], json!(["Kubernetes"]));
}

#[tokio::test]
async fn test_match_short_description_rejected() {
    let uri = format!("/api/job/match/{}", own_resume_id());
    let request = json_request(
        Method::POST,
        &uri,
        json!({ "job_title": "Engineer", "job_description": "Too short" }),
        true,
    );
    assert_eq!(send(request).await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_match_history_paginated() {
    let uri = format!("/api/job/matches?resume_id={}&page=2&per_page=5", own_resume_id());
    let request = authed(Method::GET, &uri).body(Body::empty()).unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["per_page"], 5);
    assert_eq!(body["meta"]["total"], 0);
}
