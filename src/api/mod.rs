//! HTTP API for video analysis.
//!
//! Every analysis route is served at the root and under `/api/v1`.

mod error;
mod handlers;

pub use error::ApiError;

use crate::analysis::Analyzer;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    pub analyzer: Analyzer,
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/analyze/summary", get(handlers::analyze_summary))
        .route("/analyze/topics", get(handlers::analyze_topics))
        .route("/analyze/insights", get(handlers::analyze_insights))
        .route("/schema", get(handlers::schema))
        .route("/health", get(handlers::health))
}

/// Build the application router.
pub fn router(analyzer: Analyzer) -> Router {
    let state = Arc::new(AppState { analyzer });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .merge(api_routes())
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
