//! Question answering and summarization over the stored notes.
//!
//! Both workflows read the full collection from the [`NoteStore`], build a
//! bounded context with [`context`], and make one call to the
//! [`CompletionProvider`]. An empty collection is a normal outcome that never
//! reaches the model.

pub mod context;

use thiserror::Error;

use crate::config::NotemindConfig;
use crate::llm::{CompletionProvider, CompletionRequest, LlmError};
use crate::notes::{NoteError, NoteStore};
use context::{Assembly, ContextError, Selection};

/// Reply used when there are no notes to answer a question from.
pub const NOTHING_TO_ANSWER_FROM: &str = "No notes available to answer from.";

/// Reply used when there are no notes to summarize.
pub const NOTHING_TO_SUMMARIZE: &str = "No notes available to summarize.";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    InvalidInput(#[from] ContextError),

    #[error(transparent)]
    Store(#[from] NoteError),

    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),
}

/// Model parameters and context cap for a single call.
#[derive(Debug, Clone, Copy)]
pub struct AssistantSettings {
    pub max_context_chars: usize,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl AssistantSettings {
    pub fn from_config(config: &NotemindConfig) -> Self {
        Self {
            max_context_chars: config.context.max_context_chars,
            max_output_tokens: config.llm.max_output_tokens,
            temperature: config.llm.temperature,
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self::from_config(&NotemindConfig::default())
    }
}

#[derive(Debug, Clone)]
pub enum AskOutcome {
    NothingToAnswerFrom,
    Answered {
        answer: String,
        note_ids: Vec<i64>,
        selection: Selection,
        truncated: bool,
    },
}

impl AskOutcome {
    /// The text to show the user: the answer, or the sentinel reply.
    pub fn text(&self) -> &str {
        match self {
            Self::NothingToAnswerFrom => NOTHING_TO_ANSWER_FROM,
            Self::Answered { answer, .. } => answer,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SummaryOutcome {
    NothingToSummarize,
    Summarized { summary: String, truncated: bool },
}

impl SummaryOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::NothingToSummarize => NOTHING_TO_SUMMARIZE,
            Self::Summarized { summary, .. } => summary,
        }
    }
}

/// Answer `query` from the stored notes.
///
/// The query is validated before the store is read.
pub async fn ask(
    store: &NoteStore,
    llm: &dyn CompletionProvider,
    settings: AssistantSettings,
    query: &str,
) -> Result<AskOutcome, AssistantError> {
    context::validate_query(query)?;

    let notes = store.list().await?;
    let assembly = context::assemble_question_context(query, &notes, settings.max_context_chars)?;
    let assembled = match assembly {
        Assembly::NothingToAnswerFrom => {
            tracing::info!("ask: no notes stored, skipping completion");
            return Ok(AskOutcome::NothingToAnswerFrom);
        }
        Assembly::Ready(ctx) => ctx,
    };

    tracing::info!(
        query_len = query.len(),
        notes = assembled.note_ids.len(),
        selection = ?assembled.selection,
        truncated = assembled.truncated,
        model = llm.model_name(),
        "ask: calling completion"
    );

    let answer = llm
        .complete(CompletionRequest {
            system_instruction: assembled.system_instruction,
            user_content: assembled.user_content,
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "ask: completion failed"))?;

    Ok(AskOutcome::Answered {
        answer,
        note_ids: assembled.note_ids,
        selection: assembled.selection,
        truncated: assembled.truncated,
    })
}

/// Summarize every stored note.
pub async fn summarize(
    store: &NoteStore,
    llm: &dyn CompletionProvider,
    settings: AssistantSettings,
) -> Result<SummaryOutcome, AssistantError> {
    let notes = store.list().await?;
    let Some(assembled) = context::assemble_summary_context(&notes, settings.max_context_chars)
    else {
        tracing::info!("summarize: no notes stored, skipping completion");
        return Ok(SummaryOutcome::NothingToSummarize);
    };

    tracing::info!(
        notes = assembled.note_ids.len(),
        truncated = assembled.truncated,
        model = llm.model_name(),
        "summarize: calling completion"
    );

    let summary = llm
        .complete(CompletionRequest {
            system_instruction: assembled.system_instruction,
            user_content: assembled.user_content,
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "summarize: completion failed"))?;

    Ok(SummaryOutcome::Summarized {
        summary,
        truncated: assembled.truncated,
    })
}
