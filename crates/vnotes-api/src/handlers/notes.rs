//! Note generation handler.

use axum::extract::State;
use axum::Json;
use tracing::info;

use vnotes_models::{NoteRequest, NoteResponse};

use crate::error::ApiResult;
use crate::state::AppState;

/// Generate Markdown study notes from a video URL.
///
/// Returns 200 with `{"notes": ...}` or 400 with a user-facing
/// `{"error": ...}` message.
pub async fn generate_notes(
    State(state): State<AppState>,
    Json(request): Json<NoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    info!(video_url = %request.video_url, "received note request");

    let notes = state.notes.generate_notes(&request.video_url).await?;

    Ok(Json(NoteResponse { notes }))
}
