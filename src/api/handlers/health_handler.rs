//! Root, liveness and readiness handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::config::{API_VERSION, ROOT_MESSAGE};

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "AI Resume Analyzer API")]
    pub message: &'static str,
    #[schema(example = "1.0.0")]
    pub version: &'static str,
}

/// Liveness payload
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: &'static str,
    /// Configured application name
    pub service: String,
}

/// Readiness payload with one entry per dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    #[schema(example = "healthy")]
    pub status: &'static str,
    pub service: String,
    pub checks: BTreeMap<String, ProbeStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "API banner", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
        version: API_VERSION,
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.config.app_name.clone(),
    })
}

/// Readiness check - pings the database and Redis.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "All dependencies reachable", body = ReadinessResponse),
        (status = 503, description = "A dependency is down", body = ReadinessResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> Response {
    let results = join_all(state.probes.iter().map(|probe| async move {
        (probe.name(), probe.check().await)
    }))
    .await;

    let mut all_healthy = true;
    let mut checks = BTreeMap::new();
    for (name, result) in results {
        let status = match result {
            Ok(()) => ProbeStatus {
                status: "healthy",
                error: None,
            },
            Err(error) => {
                tracing::warn!(probe = name, error = %error, "Readiness probe failed");
                all_healthy = false;
                ProbeStatus {
                    status: "unhealthy",
                    error: Some(error),
                }
            }
        };
        checks.insert(name.to_string(), status);
    }

    let response = ReadinessResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        service: state.config.app_name.clone(),
        checks,
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
