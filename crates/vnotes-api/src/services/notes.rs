//! Note generation orchestrator.
//!
//! Sequences the pipeline for one request: validate the URL, pick the mode,
//! stage/upload/poll when relaying, invoke generation, and release every
//! transient artifact before returning. Clients are constructed once at
//! startup and injected, so the service itself is stateless per request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use vnotes_gemini::{FileState, GeminiClient, RemoteFile};
use vnotes_media::{fetch_to_staging, StagedFile};
use vnotes_models::validate_video_url;

use crate::error::ApiResult;
use crate::metrics;

/// Declared media type for generation calls in both modes.
const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Orchestrates the note pipeline.
#[derive(Clone)]
pub struct NotesService {
    gemini: Arc<GeminiClient>,
    http: reqwest::Client,
    staging_dir: PathBuf,
    prompt: Arc<str>,
}

/// Transient artifacts owned by one request, recorded as they are created so
/// cleanup can release them on every exit path.
#[derive(Default)]
struct Scratch {
    staged: Option<StagedFile>,
    remote: Option<RemoteFile>,
}

impl NotesService {
    pub fn new(
        gemini: Arc<GeminiClient>,
        http: reqwest::Client,
        staging_dir: PathBuf,
        prompt: String,
    ) -> Self {
        Self {
            gemini,
            http,
            staging_dir,
            prompt: prompt.into(),
        }
    }

    /// Generate Markdown study notes for `raw_url`.
    ///
    /// Cleanup runs exactly once, whatever the outcome; a request yields
    /// exactly one of notes or a taxonomy error.
    pub async fn generate_notes(&self, raw_url: &str) -> ApiResult<String> {
        let start = Instant::now();
        metrics::record_note_request();

        let mut scratch = Scratch::default();
        let result = self.run(raw_url, &mut scratch).await;
        self.cleanup(scratch).await;

        match &result {
            Ok(notes) => {
                metrics::record_note_generated(start.elapsed().as_secs_f64());
                info!(
                    chars = notes.chars().count(),
                    elapsed_s = start.elapsed().as_secs_f64(),
                    "notes generated"
                );
            }
            Err(e) => metrics::record_note_failure(e.category()),
        }

        result
    }

    async fn run(&self, raw_url: &str, scratch: &mut Scratch) -> ApiResult<String> {
        // Validation precedes any network call.
        let url = validate_video_url(raw_url)?;

        if self.gemini.accepts_url_directly(&url) {
            info!(url = %url, "generating notes by direct reference");
            let notes = self
                .gemini
                .generate(&self.prompt, url.as_str(), VIDEO_MIME_TYPE)
                .await?;
            return Ok(notes);
        }

        info!(url = %url, "generating notes via upload relay");

        let staged = fetch_to_staging(&self.http, &url, &self.staging_dir).await?;
        let staged_path = staged.path().to_path_buf();
        scratch.staged = Some(staged);

        let remote = self
            .gemini
            .upload_video(&staged_path, VIDEO_MIME_TYPE)
            .await?;
        scratch.remote = Some(remote.clone());

        if remote.state != FileState::Active {
            self.gemini.await_active(&remote).await?;
        }

        let notes = self
            .gemini
            .generate(&self.prompt, &remote.uri, VIDEO_MIME_TYPE)
            .await?;
        Ok(notes)
    }

    /// Release per-request artifacts. Both deletions are best-effort and
    /// never replace the pipeline result.
    async fn cleanup(&self, scratch: Scratch) {
        if let Some(staged) = scratch.staged {
            staged.discard().await;
        }
        if let Some(remote) = scratch.remote {
            self.gemini.delete_file(&remote).await;
        }
    }
}
