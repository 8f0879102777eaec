//! AI Resume Analyzer - resume parsing, scoring and job matching API.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: command-line interface and its commands
//! - **config**: application configuration and constants
//! - **domain**: users, resumes, analyses and job matches
//! - **analysis**: text extraction, scoring and matching (pure functions)
//! - **services**: use cases over the Unit of Work and file storage
//! - **infra**: Postgres, Redis and filesystem storage
//! - **api**: handlers, middleware and routes
//! - **types**: pagination and response helpers
//! - **errors**: centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! resume-analyzer serve --port 8000
//! resume-analyzer migrate status
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
