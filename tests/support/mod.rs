use std::path::PathBuf;
use std::sync::Arc;

use mva_rust::config::AppConfig;
use mva_rust::http::AppState;
use mva_rust::ports::{PortCoordinates, PortsRegistry};
use mva_rust::retrieval::{KnowledgeRepository, LocalKnowledgeIndex};

/// Small registry with a few real ports, enough for distance tests.
pub fn test_registry() -> PortsRegistry {
    PortsRegistry::from_entries([
        ("SINGAPORE", PortCoordinates { lat: 1.2644, lon: 103.84 }),
        ("ROTTERDAM", PortCoordinates { lat: 51.9475, lon: 4.142 }),
        ("SANTOS", PortCoordinates { lat: -23.982, lon: -46.299 }),
    ])
}

/// Application state over the test registry and a fresh local index.
///
/// The upload directory points at a unique temp path so ingest tests do not
/// collide when run in parallel.
pub fn test_state() -> AppState {
    test_state_with_index(LocalKnowledgeIndex::new())
}

pub fn test_state_with_index(index: LocalKnowledgeIndex) -> AppState {
    let config = AppConfig {
        upload_dir: unique_temp_dir("mva-test-uploads"),
        ..AppConfig::default()
    };
    let knowledge: Arc<dyn KnowledgeRepository> = Arc::new(index);
    AppState::new(Arc::new(config), Arc::new(test_registry()), knowledge)
}

fn unique_temp_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
}
