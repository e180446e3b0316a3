//! Video URL validation.
//!
//! The pipeline only ever touches URLs that passed this check, so everything
//! downstream can assume an absolute http(s) URL.

use thiserror::Error;
use url::Url;

/// Why a submitted video URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoUrlError {
    #[error("missing video URL")]
    Missing,

    #[error("video URL must be an absolute http or https URL")]
    Invalid,
}

/// Validate a raw `videoURL` value and parse it.
///
/// Rejects empty input and anything that is not an absolute http(s) URL.
/// Runs before any network call is made.
pub fn validate_video_url(raw: &str) -> Result<Url, VideoUrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(VideoUrlError::Missing);
    }

    let url = Url::parse(trimmed).map_err(|_| VideoUrlError::Invalid)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(VideoUrlError::Invalid),
    }
}

/// Check whether a URL points at YouTube.
///
/// Gemini consumes YouTube links by reference, so these skip local staging.
pub fn is_youtube_url(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.strip_prefix("www.").unwrap_or(host);

    matches!(host, "youtube.com" | "m.youtube.com" | "youtu.be")
}
