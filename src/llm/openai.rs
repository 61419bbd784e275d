use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AudioClip, CompletionProvider, CompletionRequest, LlmError};
use crate::config::LlmConfig;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for the OpenAI REST API, or anything that speaks its
/// `/chat/completions` and `/audio/transcriptions` dialect.
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    chat_model: String,
    transcription_model: String,
    http_client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LlmError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            chat_model: config.chat_model.clone(),
            transcription_model: config.transcription_model.clone(),
            http_client,
        })
    }

    fn build_request_body(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_instruction.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_content.clone(),
                },
            ],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "completion service error");
        Err(LlmError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        tracing::debug!(
            model = %self.chat_model,
            user_len = request.user_content.len(),
            "sending chat completion"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        if choice.finish_reason.as_deref() == Some("length") {
            tracing::debug!("completion hit max_output_tokens");
        }

        Ok(choice.message.content)
    }

    async fn transcribe(&self, clip: AudioClip) -> Result<String, LlmError> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let byte_len = clip.bytes.len();

        let part = reqwest::multipart::Part::bytes(clip.bytes)
            .file_name(clip.file_name)
            .mime_str(&clip.content_type)
            .map_err(|e| LlmError::Request(format!("invalid content type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.transcription_model.clone())
            .part("file", part);

        tracing::debug!(model = %self.transcription_model, byte_len, "sending transcription");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        Ok(transcription.text)
    }

    fn model_name(&self) -> &str {
        &self.chat_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> OpenAiProvider {
        let config = LlmConfig {
            base_url: base_url.to_string(),
            api_key: "sk-test".to_string(),
            ..LlmConfig::default()
        };
        OpenAiProvider::new(&config).unwrap()
    }

    #[test]
    fn request_body_matches_openai_format() {
        let client = provider("https://api.openai.com/v1");
        let request = CompletionRequest {
            system_instruction: "Be helpful.".to_string(),
            user_content: "Hello".to_string(),
            max_output_tokens: 256,
            temperature: 0.5,
        };

        let body = client.build_request_body(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["max_tokens"], 256);

        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "Be helpful.");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "Hello");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = provider("http://localhost:11434/v1/");
        assert_eq!(client.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn chat_response_parses_first_choice() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Hi");
        assert_eq!(parsed.choices[0].finish_reason.as_deref(), Some("stop"));
    }
}
