//! # papernet HTTP API Module
//!
//! This module implements the HTTP JSON API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /api/citations` - Citation network (filters, `limit_nodes`, `sampling`)
//! - `GET /api/collaborations` - Co-authorship network (filters, `limit_nodes`)
//! - `GET /api/timeline` - Papers per year over the trailing `years`
//! - `GET /api/patent_histogram` - Patent-count distribution (optional `year`)
//! - `GET /api/health` - Health check
//!
//! ## Security Configuration
//!
//! - `cors_origins` / `PAPERNET_CORS_ORIGINS`: comma-separated allowed origins,
//!   or "*" for all (default: all origins)
//! - `rate_limit` / `PAPERNET_RATE_LIMIT`: requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use middleware::{GlobalRateLimiter, create_rate_limiter};
// Re-export handlers and types for integration tests (via `papernet::api::*`)
pub use handlers::{
    citations_handler, collaborations_handler, health_handler, patent_histogram_handler,
    timeline_handler,
};
pub use types::{
    CitationParams, CollaborationParams, GraphResponse, HealthResponse, HistogramParams,
    TimelineParams,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use papernet_core::{PapernetError, RecordStore};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the immutable record store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer.
///
/// - `None` or `"*"`: allows all origins
/// - otherwise: the comma-separated list, falling back to all origins if no
///   entry parses
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        None | Some("*") => {
            tracing::info!("CORS: Allowing all origins");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, allowing all origins");
                CorsLayer::permissive()
            } else {
                read_only_cors(allowed_origins)
            }
        }
    }
}

fn read_only_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - global quota (if enabled)
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(handlers::health_handler))
        .route("/api/citations", get(handlers::citations_handler))
        .route("/api/collaborations", get(handlers::collaborations_handler))
        .route("/api/timeline", get(handlers::timeline_handler))
        .route(
            "/api/patent_histogram",
            get(handlers::patent_histogram_handler),
        );

    match create_rate_limiter(config.rate_limit) {
        Some(limiter) => {
            tracing::info!(
                "Rate limiting enabled: {} requests/second",
                config.rate_limit
            );
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(config.cors_origins.as_deref())),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Resolves when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Start the HTTP server and serve until Ctrl+C.
pub async fn run_server(config: &ServerConfig, store: RecordStore) -> Result<(), PapernetError> {
    let router = create_router(AppState::new(store), config);
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PapernetError::Io(format!("Bind failed on {}: {}", addr, e)))?;

    tracing::info!("papernet HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PapernetError::Io(format!("Server error: {}", e)))
}
