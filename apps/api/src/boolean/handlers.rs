//! Axum route handlers for the Boolean API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::boolean::composer::{GenerationRequest, PromptMode};
use crate::boolean::session::Session;
use crate::errors::AppError;
use crate::state::AppState;

/// NOT filters applied when the client does not send any.
pub const DEFAULT_NOT_FILTERS: &str = "\"intern\", \"fresher\"";

fn default_not_filters() -> String {
    DEFAULT_NOT_FILTERS.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub jd_text: String,
    #[serde(default = "default_not_filters")]
    pub not_filters: String,
}

/// Refinement carries only the context. JD and NOT filters come from the session.
#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub jd_text: String,
    #[serde(default = "default_not_filters")]
    pub not_filters: String,
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BooleanResponse {
    pub session_id: Uuid,
    pub mode: PromptMode,
    /// Raw Markdown from the backend, expected (not guaranteed) to hold
    /// `### Buckets` and `### Boolean` sections.
    pub result: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/boolean
///
/// First-pass generation. Opens a new session on success.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<BooleanResponse>, AppError> {
    let initial = state
        .generator
        .generate_initial(&request.jd_text, &request.not_filters)
        .await?;

    let session_id = initial.session.id;
    state.sessions.insert(initial.session).await;

    Ok(Json(BooleanResponse {
        session_id,
        mode: PromptMode::JdOnly,
        result: initial.result,
    }))
}

/// POST /api/v1/boolean/:session_id/refine
///
/// Hard-filter refinement against the JD and NOT filters captured by the session.
pub async fn handle_refine(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<BooleanResponse>, AppError> {
    let session = find_session(&state, session_id).await?;

    let result = state
        .generator
        .generate_refined(&session, &request.context)
        .await?;

    Ok(Json(BooleanResponse {
        session_id,
        mode: PromptMode::StrictContext,
        result,
    }))
}

/// GET /api/v1/boolean/:session_id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(find_session(&state, session_id).await?))
}

/// DELETE /api/v1/boolean/:session_id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {session_id} not found")))
    }
}

/// POST /api/v1/boolean/preview
///
/// Returns the exact instruction that would be sent, without calling the backend.
pub async fn handle_preview(Json(request): Json<PreviewRequest>) -> Json<GenerationRequest> {
    Json(GenerationRequest::compose(
        &request.jd_text,
        &request.not_filters,
        request.context.as_deref(),
    ))
}

async fn find_session(state: &AppState, session_id: Uuid) -> Result<Session, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}
