//! MVA HTTP Server Binary
//!
//! Main entry point for the Maritime Virtual Assistant REST API server.
//! It loads configuration, initializes the port registry and the knowledge
//! index, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin mva-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `PORTS_PATH`: Port coordinate table (default: data/ports.json)
//! - `KNOWLEDGE_DIR`: Seed documents directory (default: data/knowledge)
//! - `UPLOAD_DIR`: Upload storage directory (default: storage/uploads)
//! - `MVA_CONFIG`: Optional TOML config file
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mva_rust::config::AppConfig;
use mva_rust::http::{create_router, AppState};
use mva_rust::ports;
use mva_rust::retrieval::{KnowledgeRepository, LocalKnowledgeIndex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting MVA HTTP Server");

    let config = Arc::new(AppConfig::load()?);

    // Initialize the process-scoped port registry once and share the handle.
    let ports = ports::init_ports(&config.ports_path)?;
    info!(count = ports.len(), "Ports registry loaded");

    // Build the knowledge index from the seed directory; make sure first-run
    // queries have at least the primer to land on.
    let index = Arc::new(LocalKnowledgeIndex::new());
    let indexed = index.load_directory(&config.knowledge_dir)?;
    let seeded = index.seed_primer_if_empty();
    info!(indexed, seeded, "Knowledge index ready");
    let knowledge: Arc<dyn KnowledgeRepository> = index;

    let state = AppState::new(Arc::clone(&config), ports, knowledge);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
