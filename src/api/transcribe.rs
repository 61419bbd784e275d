//! Audio upload handler.
//!
//! Expects a multipart form with an `audio_file` field carrying an `audio/*`
//! content type.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::{ApiError, AppState};
use crate::llm::AudioClip;

const AUDIO_FIELD: &str = "audio_file";

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!("upload too large: {err}"))
    } else {
        ApiError::BadRequest(format!("invalid multipart payload: {err}"))
    }
}

/// Check an uploaded file before it is sent for transcription.
pub fn validate_audio(
    content_type: Option<&str>,
    byte_len: usize,
    max_bytes: usize,
) -> Result<(), ApiError> {
    match content_type {
        Some(ct) if ct.starts_with("audio/") => {}
        Some(ct) => {
            return Err(ApiError::BadRequest(format!(
                "expected an audio/* file, got {ct}"
            )))
        }
        None => {
            return Err(ApiError::BadRequest(
                "audio file is missing a content type".into(),
            ))
        }
    }
    if byte_len == 0 {
        return Err(ApiError::BadRequest("audio file is empty".into()));
    }
    if byte_len > max_bytes {
        return Err(ApiError::BadRequest(format!(
            "audio file is {byte_len} bytes, limit is {max_bytes}"
        )));
    }
    Ok(())
}

pub async fn transcribe_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut clip: Option<AudioClip> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(AUDIO_FIELD) {
            continue; // ignore unknown fields
        }
        let file_name = field.file_name().unwrap_or("audio").to_string();
        let content_type = field.content_type().map(|c| c.to_string());
        let bytes = field.bytes().await.map_err(multipart_error)?;

        validate_audio(
            content_type.as_deref(),
            bytes.len(),
            state.config.upload.max_audio_bytes,
        )?;

        clip = Some(AudioClip {
            file_name,
            content_type: content_type.unwrap_or_default(),
            bytes: bytes.to_vec(),
        });
    }

    let clip = clip.ok_or_else(|| {
        ApiError::BadRequest(format!("missing `{AUDIO_FIELD}` field in multipart form"))
    })?;

    tracing::info!(
        file_name = %clip.file_name,
        content_type = %clip.content_type,
        byte_len = clip.bytes.len(),
        "transcribing audio"
    );

    let transcription = state.llm.transcribe(clip).await.map_err(|e| {
        tracing::error!(error = %e, "transcription failed");
        ApiError::from(e)
    })?;

    Ok(Json(TranscriptionResponse { transcription }))
}
