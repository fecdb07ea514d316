//! HTTP server module.
//!
//! Axum-based REST API over the service layer. Handlers stay thin: they
//! parse the request, call a service function and serialize the result.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Request parsing and validation                        │
//! │  - JSON serialization, CORS, compression, tracing        │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                               │
//! │  - Laytime evaluation, distances, stage guidance, agent  │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Collaborators (ports registry, knowledge repository)    │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
