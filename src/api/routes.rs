//! Application route configuration.

use axum::{
    http::Method,
    middleware,
    routing::get,
    Router,
};
use tower::Layer;
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::health_handler::{health, readiness, root};
use super::handlers::{auth_routes, job_match_routes, resume_routes};
use super::middleware::{
    auth_middleware, options_ok, rate_limit_auth_middleware, rate_limit_middleware,
};
use super::openapi::api_doc;
use super::AppState;
use crate::errors::AppError;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let protect = |routes: Router<AppState>| {
        routes
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_middleware,
            ))
    };

    Router::new()
        // Status endpoints (no rate limiting)
        .route("/", get(root))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc(&state.config)))
        // Authentication routes (stricter rate limiting)
        .nest(
            "/api/auth",
            auth_routes(state.clone()).route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_auth_middleware,
            )),
        )
        // Protected routes (require JWT + general rate limiting)
        .nest(
            "/api/resume",
            protect(resume_routes(state.config.max_upload_bytes)),
        )
        .nest("/api/job", protect(job_match_routes()))
        .fallback(not_found)
        // Global middleware; CORS answers preflights, options_ok the rest
        .layer(cors_layer())
        .layer(middleware::from_fn(options_ok))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The router behind trailing-slash normalisation.
///
/// Path normalisation has to run before routing, so it wraps the router
/// rather than being added with `Router::layer`.
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
