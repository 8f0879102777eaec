//! CLI module - command-line interface for the application.
//!
//! - `serve` starts the HTTP server
//! - `migrate` manages the database schema

pub mod args;

pub use args::{Cli, Commands};
