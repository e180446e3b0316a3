//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /generate`: video URL in, Markdown study notes out
//! - The orchestrator sequencing fetch, upload, readiness poll, generation
//!   and cleanup
//! - The user-facing error taxonomy
//! - Health endpoints, CORS, security headers and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod prompt;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::NotesService;
pub use state::AppState;
