//! API error types.
//!
//! Lower layers attach structured kinds where failures happen; this module
//! maps them to the fixed set of user-facing messages. Full detail is logged
//! here and never leaves the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use vnotes_gemini::GeminiError;
use vnotes_media::MediaError;
use vnotes_models::{ErrorResponse, VideoUrlError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] VideoUrlError),

    #[error("video fetch failed: {0}")]
    Fetch(#[from] MediaError),

    #[error("remote video processing failed: {0}")]
    RemoteProcessing(String),

    #[error("authorization or quota failure: {0}")]
    AuthOrQuota(String),

    #[error("generation produced insufficient content")]
    EmptyGeneration,

    #[error("video processing timed out after {0} seconds")]
    Timeout(u64),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<GeminiError> for ApiError {
    fn from(e: GeminiError) -> Self {
        match e {
            GeminiError::AuthOrQuota(detail) => Self::AuthOrQuota(detail),
            GeminiError::FileProcessing(detail) => Self::RemoteProcessing(detail),
            GeminiError::FileTimeout(secs) => Self::Timeout(secs),
            GeminiError::EmptyGeneration => Self::EmptyGeneration,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    /// Stable label for logs and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Fetch(_) => "fetch",
            ApiError::RemoteProcessing(_) => "remote_processing",
            ApiError::AuthOrQuota(_) => "auth_or_quota",
            ApiError::EmptyGeneration => "empty_generation",
            ApiError::Timeout(_) => "timeout",
            ApiError::Internal(_) => "internal",
        }
    }

    /// The message shown to the caller.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(VideoUrlError::Missing) => "Brak 'videoURL' w zapytaniu.",
            ApiError::InvalidInput(VideoUrlError::Invalid) => {
                "Nieprawidłowy lub brakujący adres URL wideo."
            }
            ApiError::Fetch(_) | ApiError::RemoteProcessing(_) => {
                "Błąd wideo: Wprowadzony adres URL jest nieprawidłowy, wideo nie jest dostępne lub nie można go przetworzyć."
            }
            ApiError::AuthOrQuota(_) => {
                "Błąd autoryzacji: Problem z kluczem API lub przekroczono limit. Skontaktuj się z administratorem."
            }
            ApiError::EmptyGeneration => {
                "Model nie był w stanie wygenerować treści. Upewnij się, że film jest dostępny i ma transkrypcję."
            }
            ApiError::Timeout(_) => {
                "Przetwarzanie filmu trwa zbyt długo. Spróbuj ponownie później."
            }
            ApiError::Internal(_) => {
                "Przepraszamy, wystąpił problem podczas generowania notatek. Spróbuj ponownie później."
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(category = self.category(), detail = %self, "request failed");

        // Every failure surfaces as 400 with a user-safe message.
        let body = ErrorResponse {
            error: self.user_message().to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_error_mapping() {
        let mapped = ApiError::from(GeminiError::AuthOrQuota("401".to_string()));
        assert!(matches!(mapped, ApiError::AuthOrQuota(_)));

        let mapped = ApiError::from(GeminiError::FileProcessing("files/abc".to_string()));
        assert!(matches!(mapped, ApiError::RemoteProcessing(_)));

        let mapped = ApiError::from(GeminiError::FileTimeout(600));
        assert!(matches!(mapped, ApiError::Timeout(600)));

        let mapped = ApiError::from(GeminiError::EmptyGeneration);
        assert!(matches!(mapped, ApiError::EmptyGeneration));

        let mapped = ApiError::from(GeminiError::RequestFailed("500".to_string()));
        assert!(matches!(mapped, ApiError::Internal(_)));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ApiError::InvalidInput(VideoUrlError::Missing).user_message(),
            "Brak 'videoURL' w zapytaniu."
        );
        assert_eq!(
            ApiError::InvalidInput(VideoUrlError::Invalid).user_message(),
            "Nieprawidłowy lub brakujący adres URL wideo."
        );
        assert!(ApiError::EmptyGeneration
            .user_message()
            .starts_with("Model nie był w stanie wygenerować treści."));
        assert!(ApiError::AuthOrQuota(String::new())
            .user_message()
            .starts_with("Błąd autoryzacji"));
    }

    #[test]
    fn test_fetch_failures_use_video_message() {
        let err = ApiError::Fetch(MediaError::SourceStatus { status: 404 });
        assert!(err.user_message().starts_with("Błąd wideo"));
        assert_eq!(err.user_message(), ApiError::RemoteProcessing(String::new()).user_message());
    }
}
