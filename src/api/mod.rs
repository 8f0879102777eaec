//! API layer - HTTP handlers and middleware
//!
//! Routes, request handlers, authentication and rate limiting middleware,
//! extractors and the OpenAPI document.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::{api_doc, ApiDoc};
pub use routes::{create_app, create_router};
pub use state::AppState;
