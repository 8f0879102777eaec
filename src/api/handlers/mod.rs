//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod job_match_handler;
pub mod resume_handler;

pub use auth_handler::auth_routes;
pub use job_match_handler::job_match_routes;
pub use resume_handler::resume_routes;
