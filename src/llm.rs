//! External text-generation collaborator.
//!
//! Thin, non-streaming client for an OpenAI-compatible
//! `/v1/chat/completions` endpoint. One attempt per call, bounded timeout,
//! no retry: every failure shape collapses into [`LlmError`] and the
//! summarizer falls back to local text.

use std::time::Duration;

use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {snippet}")]
    Status { status: StatusCode, snippet: String },
    #[error("response contained no usable content")]
    EmptyContent,
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Anything that can turn a system instruction plus user content into text.
/// The summarizer depends on this seam so tests can substitute a counting
/// fake for the HTTP client.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Reads the optional generation service config from the environment.
    /// Absent `OPENAI_API_KEY` means the service is not configured and the
    /// summarizer runs on local fallbacks only.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        let endpoint =
            std::env::var("LLM_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Some(Self {
            endpoint,
            api_key,
            model,
            timeout_secs,
        })
    }
}

#[derive(Debug)]
pub struct LlmClient {
    client: reqwest::Client,
    url_chat: String,
    model: String,
}

impl LlmClient {
    pub fn new(cfg: LlmConfig) -> Result<Self, LlmError> {
        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(LlmError::Config(format!("invalid endpoint {endpoint:?}")));
        }

        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
            .map_err(|e| LlmError::Config(format!("invalid API key header: {e}")))?;
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        let url_chat = format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'));

        Ok(Self {
            client,
            url_chat,
            model: cfg.model,
        })
    }
}

impl TextGenerator for LlmClient {
    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        debug!(model = %self.model, user_len = user.len(), "POST {}", self.url_chat);

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(SNIPPET_LEN).collect();
            warn!(%status, %snippet, "chat completion returned non-success status");
            return Err(LlmError::Status { status, snippet });
        }

        let out: ChatCompletionResponse = resp.json().await?;
        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_system_then_user() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "Summarize the journal.",
                },
                ChatMessage {
                    role: "user",
                    content: "Learned SQL basics.",
                },
            ],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "Learned SQL basics.");
    }

    #[test]
    fn response_extracts_first_choice_content() {
        let raw = r#"{"choices":[{"message":{"content":"The intern practiced SQL."}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .unwrap();
        assert_eq!(content, "The intern practiced SQL.");
    }

    #[test]
    fn client_rejects_non_http_endpoint() {
        let cfg = LlmConfig {
            endpoint: "ftp://example.com".to_string(),
            api_key: "sk-test".to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        assert!(matches!(LlmClient::new(cfg), Err(LlmError::Config(_))));
    }
}
