//! Gemini HTTP client.
//!
//! This crate provides:
//! - Resumable upload to the Files API and the readiness poll that waits for
//!   a terminal processing state
//! - Best-effort remote file deletion
//! - Single-turn `generateContent` invocation with structured failure kinds

pub mod client;
pub mod error;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{GeminiError, GeminiResult};
pub use types::{FileState, RemoteFile};
