//! Gemini client error types.
//!
//! Failures carry a structured kind attached where the failure is observed,
//! so callers match on variants instead of parsing message text.

use thiserror::Error;

pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Authorization or quota failure: {0}")]
    AuthOrQuota(String),

    #[error("Remote file processing failed: {0}")]
    FileProcessing(String),

    #[error("Remote file still processing after {0} seconds")]
    FileTimeout(u64),

    #[error("Model produced no usable content")]
    EmptyGeneration,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
