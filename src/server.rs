// ABOUTME: HTTP server assembly: merges domain routers and applies tracing and CORS layers
// ABOUTME: Serves the application router on the configured port until Ctrl+C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use companion_core::errors::{AppError, AppResult};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, ChallengeRoutes, GamificationRoutes, HealthRoutes, MealRoutes};

/// Full application router with tracing and CORS applied
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(MealRoutes::routes(Arc::clone(&resources)))
        .merge(GamificationRoutes::routes(Arc::clone(&resources)))
        .merge(ChallengeRoutes::routes(resources))
        .fallback(handle_unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn handle_unknown_route() -> AppError {
    AppError::not_found("Route")
}

/// Bind the configured port and serve until shutdown is requested
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn run_server(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], resources.config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "HTTP server listening");
    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
