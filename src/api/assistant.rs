//! Question answering and summarization handlers.
//!
//! Both reply with a bare JSON string: the model's text, or the sentinel
//! reply when there are no notes.

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::assistant;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<String>, ApiError> {
    let outcome = assistant::ask(
        &state.store,
        state.llm.as_ref(),
        state.assistant_settings(),
        &request.query,
    )
    .await?;

    Ok(Json(outcome.text().to_string()))
}

pub async fn summarize(State(state): State<AppState>) -> Result<Json<String>, ApiError> {
    let outcome =
        assistant::summarize(&state.store, state.llm.as_ref(), state.assistant_settings()).await?;

    Ok(Json(outcome.text().to_string()))
}
