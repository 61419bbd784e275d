//! Note CRUD and service-information handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct NoteContentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct NoteWrittenResponse {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub note_count: usize,
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "notemind - AI notes API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "add_note": "POST /add_note",
            "get_notes": "GET /get_notes",
            "edit_note": "PUT /edit_note/{id}",
            "delete_note": "DELETE /delete_note/{id}",
            "summarize": "POST /summarize",
            "ask": "POST /ask",
            "transcribe_audio": "POST /transcribe_audio",
        },
        "status": "running",
    }))
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let note_count = state.store.count().await?;
    Ok(Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        note_count,
    }))
}

pub async fn add_note(
    State(state): State<AppState>,
    Json(request): Json<NoteContentRequest>,
) -> Result<Json<NoteWrittenResponse>, ApiError> {
    let content_len = request.content.len();
    let id = state.store.insert(request.content).await?;
    tracing::info!(note_id = id, content_len, "note added");

    Ok(Json(NoteWrittenResponse {
        message: "Note added successfully",
        id,
    }))
}

/// Every note as an `[id, content]` pair, ascending by id.
pub async fn get_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<(i64, String)>>, ApiError> {
    let notes = state.store.list().await?;
    Ok(Json(notes.into_iter().map(|n| (n.id, n.content)).collect()))
}

pub async fn edit_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<NoteContentRequest>,
) -> Result<Json<NoteWrittenResponse>, ApiError> {
    let note = state.store.update(id, request.content).await?;
    tracing::info!(note_id = note.id, content_len = note.content.len(), "note edited");

    Ok(Json(NoteWrittenResponse {
        message: "Note updated successfully",
        id: note.id,
    }))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete(id).await?;
    tracing::info!(note_id = id, "note deleted");

    Ok(Json(MessageResponse {
        message: "Note deleted successfully",
    }))
}
