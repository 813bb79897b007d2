pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::boolean::handlers;
use crate::ingest::handlers::handle_extract;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Document ingestion
        .route(
            "/api/v1/jd/extract",
            post(handle_extract).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        // Boolean generation
        .route("/api/v1/boolean", post(handlers::handle_generate))
        .route("/api/v1/boolean/preview", post(handlers::handle_preview))
        .route(
            "/api/v1/boolean/:session_id",
            get(handlers::handle_get_session).delete(handlers::handle_end_session),
        )
        .route(
            "/api/v1/boolean/:session_id/refine",
            post(handlers::handle_refine),
        )
        .with_state(state)
}
