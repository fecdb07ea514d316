//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual work.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::dto::{
    ChatRequest, ChatResponse, DistanceQuery, DistanceResponse, HealthResponse, IngestResponse,
    LaytimeRequest, LaytimeResult, StageGuidance,
};
use super::error::AppError;
use super::state::AppState;
use crate::retrieval::Document;
use crate::services;
use crate::services::stages::VoyageStage;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let documents = state.knowledge.document_count().await.unwrap_or(0);
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documents,
    }))
}

// =============================================================================
// Chat
// =============================================================================

/// POST /v1/chat
///
/// Route a free-text message to the matching calculator or the knowledge
/// base and return the composed reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> HandlerResult<ChatResponse> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Send a 'message' field.".to_string()));
    }

    let reply = services::run_agent(&state.ports, state.knowledge.as_ref(), message).await;
    Ok(Json(ChatResponse {
        reply: reply.reply,
        citations: reply.citations,
    }))
}

// =============================================================================
// Calculators
// =============================================================================

/// POST /v1/laytime
///
/// Structured laytime evaluation, bypassing the chat grammar.
pub async fn evaluate_laytime(
    Json(request): Json<LaytimeRequest>,
) -> HandlerResult<LaytimeResult> {
    let result = services::evaluate_laytime(&request)?;
    Ok(Json(result))
}

/// GET /v1/distance?from=<port>&to=<port>
pub async fn get_distance(
    State(state): State<AppState>,
    Query(query): Query<DistanceQuery>,
) -> HandlerResult<DistanceResponse> {
    let nautical_miles = state.ports.distance_nm(&query.from, &query.to)?;
    Ok(Json(DistanceResponse {
        from: query.from,
        to: query.to,
        nautical_miles,
    }))
}

/// GET /v1/stages/{stage}
pub async fn get_stage_guidance(Path(stage): Path<String>) -> HandlerResult<StageGuidance> {
    let stage: VoyageStage = stage.parse().map_err(|_| {
        AppError::BadRequest(
            "Unknown stage. Stages I know: pre-fixture, post-fixture, loading, discharge."
                .to_string(),
        )
    })?;
    Ok(Json(services::stage_guidance(stage)))
}

// =============================================================================
// Ingestion
// =============================================================================

/// POST /v1/ingest (multipart)
///
/// Store uploaded files under the upload directory and add their content to
/// the knowledge index. Duplicate content (by checksum) is skipped.
pub async fn ingest_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> HandlerResult<IngestResponse> {
    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {}", e)))?;

    let mut files = Vec::new();
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart payload: {}", e)))?
    {
        let name = field
            .file_name()
            .map(sanitize_filename)
            .unwrap_or_else(|| format!("upload-{}", Uuid::new_v4()));
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let dest = state.config.upload_dir.join(&name);
        tokio::fs::write(&dest, &bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store {}: {}", name, e)))?;

        documents.push(Document::new(
            name.clone(),
            String::from_utf8_lossy(&bytes).into_owned(),
        ));
        files.push(name);
    }

    let added = state.knowledge.add_documents(documents).await?;
    Ok(Json(IngestResponse { added, files }))
}

/// Strip any path components and unsafe characters from an upload filename.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
