//! Data Transfer Objects for the HTTP API.
//!
//! The laytime request/result and stage guidance types already derive
//! serde and are re-exported as-is; the rest of the wire types live here.

use serde::{Deserialize, Serialize};

pub use crate::models::laytime::{ExclusionWindow, LaytimeRequest, LaytimeResult, LaytimeStatus};
pub use crate::services::stages::StageGuidance;

/// Request body for the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Accepted for API compatibility; sessions are not persisted.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Chat reply with citation filenames for retrieval-backed answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub citations: Vec<String>,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of documents in the knowledge index.
    pub documents: usize,
}

/// Query parameters for the distance endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceQuery {
    pub from: String,
    pub to: String,
}

/// Great-circle distance result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub from: String,
    pub to: String,
    pub nautical_miles: f64,
}

/// Response for document ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Number of documents newly added to the index (duplicates skipped).
    pub added: usize,
    /// Filenames stored under the upload directory.
    pub files: Vec<String>,
}
