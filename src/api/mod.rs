//! HTTP surface.
//!
//! # Endpoints
//!
//! - `GET /` - Service information
//! - `GET /health` - Health check with note count
//! - `POST /add_note` - Store a note
//! - `GET /get_notes` - All notes as `[id, content]` pairs
//! - `PUT /edit_note/{id}` - Replace a note's content
//! - `DELETE /delete_note/{id}` - Delete a note
//! - `POST /summarize` - Summarize every note
//! - `POST /ask` - Answer a question from the notes
//! - `POST /transcribe_audio` - Speech to text for an uploaded audio file
//!
//! Errors are returned as `{"error": {"code": "...", "message": "..."}}`.

pub mod assistant;
pub mod notes;
pub mod transcribe;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::assistant::{AssistantError, AssistantSettings};
use crate::config::NotemindConfig;
use crate::llm::{CompletionProvider, LlmError};
use crate::notes::{NoteError, NoteStore};

/// Room for multipart boundaries and headers on top of the audio payload.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: NoteStore,
    pub llm: Arc<dyn CompletionProvider>,
    pub config: Arc<NotemindConfig>,
}

impl AppState {
    pub fn new(
        store: NoteStore,
        llm: Arc<dyn CompletionProvider>,
        config: Arc<NotemindConfig>,
    ) -> Self {
        Self { store, llm, config }
    }

    pub fn assistant_settings(&self) -> AssistantSettings {
        AssistantSettings::from_config(&self.config)
    }
}

/// Create the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    // The browser UI is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = state.config.upload.max_audio_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/", get(notes::root))
        .route("/health", get(notes::health))
        .route("/add_note", post(notes::add_note))
        .route("/get_notes", get(notes::get_notes))
        .route("/edit_note/{id}", put(notes::edit_note))
        .route("/delete_note/{id}", delete(notes::delete_note))
        .route("/summarize", post(assistant::summarize))
        .route("/ask", post(assistant::ask))
        .route(
            "/transcribe_audio",
            post(transcribe::transcribe_audio).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. `"not_found"`).
    pub code: &'static str,
    pub message: String,
}

/// Handler error that converts into an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// The completion or transcription service failed.
    #[error("{0}")]
    Completion(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Completion(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::Completion(_) => "completion_failed",
            Self::Internal(_) => "storage_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NotFound(_) => Self::NotFound(err.to_string()),
            NoteError::InvalidInput(_) => Self::BadRequest(err.to_string()),
            NoteError::Storage(_) | NoteError::Unavailable(_) => {
                tracing::error!(error = %err, "store failure");
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        Self::Completion(err.to_string())
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::InvalidInput(e) => Self::BadRequest(e.to_string()),
            AssistantError::Store(e) => e.into(),
            AssistantError::Completion(e) => e.into(),
        }
    }
}
