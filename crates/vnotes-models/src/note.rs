//! Wire types for the note generation endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `POST /generate`.
///
/// The field is defaulted so an absent `videoURL` deserializes to an empty
/// string; validation treats both the same way.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteRequest {
    /// Source video URL.
    #[serde(default, rename = "videoURL")]
    pub video_url: String,
}

/// Successful response body: Markdown study notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub notes: String,
}

/// Failure response body: user-facing message only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_request_field_name() {
        let request: NoteRequest =
            serde_json::from_str(r#"{"videoURL": "https://example.com/v.mp4"}"#).unwrap();
        assert_eq!(request.video_url, "https://example.com/v.mp4");
    }

    #[test]
    fn test_note_request_missing_field_defaults_to_empty() {
        let request: NoteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.video_url, "");
    }

    #[test]
    fn test_note_response_shape() {
        let json = serde_json::to_string(&NoteResponse {
            notes: "# Tytuł".to_string(),
        })
        .unwrap();
        assert_eq!(json, r##"{"notes":"# Tytuł"}"##);
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse {
            error: "Brak 'videoURL' w zapytaniu.".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"error":"Brak 'videoURL' w zapytaniu."}"#);
    }
}
