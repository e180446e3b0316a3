//! Fetch-and-stage: stream a remote video into local transient storage.
//!
//! Each request gets its own uniquely named staged file, so concurrent
//! requests never contend for a path. The staged copy is owned by the
//! request and discarded when the request finishes, whatever the outcome.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::error::{MediaError, MediaResult};

/// Local transient copy of a remote video, owned for the duration of one
/// request.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    created_at: DateTime<Utc>,
}

impl StagedFile {
    /// Path of the staged copy on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the staged copy was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Delete the staged copy. Best-effort and idempotent: failures are
    /// logged and never propagate.
    pub async fn discard(&self) {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed staged file");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to remove staged file"
                );
            }
        }
    }
}

/// Stream the resource at `url` into a uniquely named file under
/// `staging_dir`.
///
/// The body is copied chunk-by-chunk and never buffered in memory. A non-2xx
/// response or a mid-stream failure removes the partial file and returns an
/// error, so a `StagedFile` always refers to a complete download.
pub async fn fetch_to_staging(
    http: &reqwest::Client,
    url: &Url,
    staging_dir: &Path,
) -> MediaResult<StagedFile> {
    fs::create_dir_all(staging_dir).await?;

    let path = staging_dir.join(format!("vnotes-{}.mp4", Uuid::new_v4().simple()));

    info!(url = %url, path = %path.display(), "downloading video");

    let response = http.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MediaError::SourceStatus {
            status: status.as_u16(),
        });
    }

    let staged = StagedFile {
        path: path.clone(),
        created_at: Utc::now(),
    };

    if let Err(e) = copy_body(response, &path).await {
        // Nothing else owns the path yet, so remove the partial file here.
        staged.discard().await;
        return Err(e);
    }

    let size = match fs::metadata(&path).await {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            staged.discard().await;
            return Err(e.into());
        }
    };
    info!(
        path = %path.display(),
        size_mb = size as f64 / (1024.0 * 1024.0),
        "downloaded video successfully"
    );

    Ok(staged)
}

async fn copy_body(response: reqwest::Response, path: &Path) -> MediaResult<()> {
    let mut file = fs::File::create(path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            MediaError::download_failed(format!("connection failed mid-stream: {e}"))
        })?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}
