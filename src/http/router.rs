//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and
//! returns the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/chat", post(handlers::chat))
        .route("/laytime", post(handlers::evaluate_laytime))
        .route("/distance", get(handlers::get_distance))
        .route("/stages/{stage}", get(handlers::get_stage_guidance))
        .route("/ingest", post(handlers::ingest_documents));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Uploaded charter parties and SOFs are small text documents.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
