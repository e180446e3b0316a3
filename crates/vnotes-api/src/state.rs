//! Application state.

use std::sync::Arc;
use std::time::Duration;

use vnotes_gemini::GeminiClient;

use crate::config::ApiConfig;
use crate::services::NotesService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub notes: NotesService,
}

impl AppState {
    /// Create new application state.
    ///
    /// Fails when the Gemini credential is missing, so a misconfigured
    /// process stops at startup instead of failing per-request.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let gemini = Arc::new(GeminiClient::from_env()?);

        // Downloads stream large bodies, so only the connect phase is bounded.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let notes = NotesService::new(
            gemini,
            http,
            config.staging_dir.clone(),
            config.prompt.clone(),
        );

        Ok(Self { config, notes })
    }
}
