//! Hosted completion and transcription service.
//!
//! Provides the [`CompletionProvider`] trait and an OpenAI-compatible HTTP
//! implementation. The provider is created via [`create_provider`] from
//! configuration.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// One single-shot completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_content: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// An uploaded audio file to transcribe.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to completion service failed: {0}")]
    Request(String),

    #[error("completion service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse completion response: {0}")]
    Parse(String),

    #[error("completion service returned no choices")]
    EmptyResponse,
}

/// Text generation and speech-to-text collaborator.
///
/// Calls are blocking round trips from the caller's point of view; no retry
/// is attempted here.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate text for a system instruction plus user content.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    /// Convert speech in `clip` to text.
    async fn transcribe(&self, clip: AudioClip) -> Result<String, LlmError>;

    /// Chat model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Create a completion provider from config.
///
/// Currently only `"openai"` is supported (any OpenAI-compatible base URL).
pub fn create_provider(
    config: &crate::config::LlmConfig,
) -> anyhow::Result<Box<dyn CompletionProvider>> {
    match config.provider.as_str() {
        "openai" => {
            anyhow::ensure!(
                !config.api_key.is_empty(),
                "OPENAI_API_KEY is not set (or llm.api_key in the config file)"
            );
            let provider = openai::OpenAiProvider::new(config)?;
            Ok(Box::new(provider))
        }
        other => anyhow::bail!("unknown llm provider: {other}. Supported: openai"),
    }
}
