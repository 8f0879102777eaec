//! Serve command - starts the HTTP server.

use axum::{extract::Request, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{create_app, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};

pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    let config = Arc::new(config);

    tracing::info!(app = %config.app_name, version = %config.app_version, "Starting server...");

    // Tables are created here, before the first request
    let db = Arc::new(Database::connect(&config).await?);

    let cache = Arc::new(Cache::connect(&config).await?);
    tracing::info!("Redis cache connected");

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!(dir = %config.upload_dir.display(), "Upload directory ready");

    let app = create_app(AppState::from_config(db, cache, config.clone()));

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    // Client addresses feed the rate limiter
    let service = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app);
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
