//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::ports::PortsRegistry;
use crate::retrieval::KnowledgeRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Port coordinate table, immutable after startup.
    pub ports: Arc<PortsRegistry>,
    /// Retrieval backend for the chat fallback and ingestion.
    pub knowledge: Arc<dyn KnowledgeRepository>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        ports: Arc<PortsRegistry>,
        knowledge: Arc<dyn KnowledgeRepository>,
    ) -> Self {
        Self {
            config,
            ports,
            knowledge,
        }
    }
}
