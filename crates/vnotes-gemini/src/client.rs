//! Gemini API client.
//!
//! One client instance is built at startup and shared across requests; every
//! method takes `&self` and holds no per-request state.

use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{GeminiError, GeminiResult};
use crate::types::{
    ApiErrorEnvelope, Content, FileInfo, FileMetadata, FileState, GenerateContentRequest,
    GenerateContentResponse, Part, RemoteFile, UploadResponse, UploadStartRequest,
};

/// Production API endpoint. Overridable for tests.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Results shorter than this are treated as empty/error stubs rather than
/// real notes.
const MIN_NOTES_CHARS: usize = 50;

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API credential. Required at process start.
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model id used for generation
    pub model: String,
    /// Whether the model accepts arbitrary external video URLs by reference
    pub direct_video_urls: bool,
    /// Per-request HTTP timeout
    pub timeout: Duration,
    /// Interval between readiness polls
    pub poll_interval: Duration,
    /// Ceiling on total readiness-poll wait
    pub poll_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            direct_video_urls: false,
            timeout: Duration::from_secs(600),
            poll_interval: Duration::from_secs(5),
            poll_timeout: Duration::from_secs(600),
        }
    }
}

impl GeminiConfig {
    /// Create config from environment variables.
    ///
    /// Fails with `MissingApiKey` when `GEMINI_API_KEY` is absent, so a
    /// misconfigured process refuses to start instead of failing per-request.
    pub fn from_env() -> GeminiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GeminiError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            direct_video_urls: std::env::var("GEMINI_DIRECT_VIDEO_URLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            poll_interval: Duration::from_secs(
                std::env::var("GEMINI_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            poll_timeout: Duration::from_secs(
                std::env::var("GEMINI_POLL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
        })
    }
}

/// Client for the Gemini generation and file-processing APIs.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client.
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GeminiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GeminiResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Whether `url` can be passed to the model by reference, skipping the
    /// upload relay. YouTube links are consumed directly; everything else
    /// depends on the configured capability flag.
    pub fn accepts_url_directly(&self, url: &Url) -> bool {
        self.config.direct_video_urls || vnotes_models::is_youtube_url(url)
    }

    /// Upload a staged video via the resumable Files API protocol.
    ///
    /// The returned handle may still be `PROCESSING`; callers go through
    /// [`await_active`](Self::await_active) before referencing it.
    pub async fn upload_video(&self, path: &Path, mime_type: &str) -> GeminiResult<RemoteFile> {
        let size = tokio::fs::metadata(path).await?.len();
        let display_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("video")
            .to_string();

        debug!(
            display_name = %display_name,
            size_mb = size as f64 / (1024.0 * 1024.0),
            "starting resumable upload"
        );

        let start_url = format!(
            "{}/v1beta/files:upload?key={}",
            self.config.base_url, self.config.api_key
        );
        let start = self
            .http
            .post(&start_url)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", size.to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&UploadStartRequest {
                file: FileMetadata { display_name },
            })
            .send()
            .await?;

        if !start.status().is_success() {
            return Err(classify_response("files:upload start", start).await);
        }

        let upload_url = start
            .headers()
            .get("X-Goog-Upload-URL")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                GeminiError::InvalidResponse("missing X-Goog-Upload-URL header".to_string())
            })?;

        // Stream the staged bytes straight from disk.
        let file = tokio::fs::File::open(path).await?;
        let finalize = self
            .http
            .post(&upload_url)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .header(CONTENT_LENGTH, size.to_string())
            .header(CONTENT_TYPE, mime_type)
            .body(file)
            .send()
            .await?;

        if !finalize.status().is_success() {
            return Err(classify_response("files:upload finalize", finalize).await);
        }

        let response: UploadResponse = finalize.json().await.map_err(|e| {
            GeminiError::InvalidResponse(format!("decoding upload response: {e}"))
        })?;

        let info = response.file;
        let uri = info.uri.ok_or_else(|| {
            GeminiError::InvalidResponse("upload response missing file.uri".to_string())
        })?;

        info!(name = %info.name, state = ?info.state, "uploaded video");

        Ok(RemoteFile {
            name: info.name,
            uri,
            state: info.state,
        })
    }

    /// Poll `files.get` until the upload leaves `PROCESSING`.
    ///
    /// `ACTIVE` resolves the wait; `FAILED` fails with `FileProcessing`. The
    /// wait is bounded by `poll_timeout` and expiry fails with `FileTimeout`.
    pub async fn await_active(&self, file: &RemoteFile) -> GeminiResult<()> {
        match file.state {
            FileState::Active => return Ok(()),
            FileState::Failed => return Err(GeminiError::FileProcessing(file.name.clone())),
            FileState::Processing | FileState::Unspecified => {}
        }

        let deadline = Instant::now() + self.config.poll_timeout;
        loop {
            if Instant::now() >= deadline {
                return Err(GeminiError::FileTimeout(self.config.poll_timeout.as_secs()));
            }
            tokio::time::sleep(self.config.poll_interval).await;

            let info = self.get_file(&file.name).await?;
            match info.state {
                FileState::Active => {
                    info!(name = %file.name, "remote file is active");
                    return Ok(());
                }
                FileState::Failed => {
                    return Err(GeminiError::FileProcessing(file.name.clone()));
                }
                FileState::Processing | FileState::Unspecified => {
                    debug!(name = %file.name, state = ?info.state, "remote file still processing");
                }
            }
        }
    }

    /// Request deletion of an uploaded file. Best-effort: failures are
    /// logged and never propagate.
    pub async fn delete_file(&self, file: &RemoteFile) {
        let url = format!(
            "{}/v1beta/{}?key={}",
            self.config.base_url, file.name, self.config.api_key
        );

        match self.http.delete(&url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(name = %file.name, "deleted remote file");
            }
            Ok(response) => {
                warn!(
                    name = %file.name,
                    status = %response.status(),
                    "failed to delete remote file"
                );
            }
            Err(e) => {
                warn!(name = %file.name, error = %e, "failed to delete remote file");
            }
        }
    }

    /// Invoke `generateContent` with a prompt and a media reference.
    ///
    /// `file_uri` is either an external video URL (direct-reference mode) or
    /// an uploaded file's URI; the wire shape is the same. A single attempt
    /// is made. Results shorter than 50 characters fail with
    /// `EmptyGeneration`.
    pub async fn generate(
        &self,
        prompt: &str,
        file_uri: &str,
        mime_type: &str,
    ) -> GeminiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::text(prompt), Part::file_data(file_uri, mime_type)],
            }],
        };

        debug!(model = %self.config.model, file_uri = %file_uri, "invoking generateContent");

        let response = self.http.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(classify_response("generateContent", response).await);
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            GeminiError::InvalidResponse(format!("decoding generateContent response: {e}"))
        })?;

        let text = payload.text().ok_or(GeminiError::EmptyGeneration)?;
        if text.chars().count() < MIN_NOTES_CHARS {
            return Err(GeminiError::EmptyGeneration);
        }

        info!(chars = text.chars().count(), "generated notes");
        Ok(text)
    }

    async fn get_file(&self, name: &str) -> GeminiResult<FileInfo> {
        let url = format!(
            "{}/v1beta/{}?key={}",
            self.config.base_url, name, self.config.api_key
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(classify_response("files.get", response).await);
        }

        response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidResponse(format!("decoding files.get response: {e}")))
    }
}

/// Drain a failed response and classify it.
async fn classify_response(context: &str, response: reqwest::Response) -> GeminiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_failure(context, status, &body)
}

/// Attach a structured kind to an API failure, using the HTTP status and the
/// Google RPC status field rather than message text.
fn classify_failure(context: &str, status: StatusCode, body: &str) -> GeminiError {
    let parsed: ApiErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let rpc_status = parsed.error.status;
    let message = if parsed.error.message.is_empty() {
        body.chars().take(200).collect()
    } else {
        parsed.error.message
    };

    let auth_or_quota = matches!(status.as_u16(), 401 | 403 | 429)
        || matches!(
            rpc_status.as_str(),
            "UNAUTHENTICATED" | "PERMISSION_DENIED" | "RESOURCE_EXHAUSTED"
        );

    if auth_or_quota {
        GeminiError::AuthOrQuota(format!("{context} returned {status}: {message}"))
    } else {
        GeminiError::RequestFailed(format!("{context} returned {status}: {message}"))
    }
}
