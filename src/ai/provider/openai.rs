//! OpenAI-compatible Chat Completions Provider
//!
//! Works against any endpoint speaking the Chat Completions wire format.
//! Groq is the default backend. Reasoning models wrap their scratch work in
//! `<think>` blocks, which are removed from the returned text.

use async_trait::async_trait;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use tracing::debug;

use super::CompletionProvider;
use crate::config::LlmConfig;
use crate::constants::llm;
use crate::types::{
    CompletionError, ErrorCategory, ErrorClassifier, ProjdocError, Result, truncate_chars,
};

const PROVIDER_NAME: &str = "openai-compatible";

/// Body excerpt kept in errors about malformed responses
const BODY_EXCERPT_CHARS: usize = 500;

/// Closed blocks, plus an unterminated one cut off by the token limit
static THINK_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?(?:</think>|\z)").ok());

/// Chat Completions client with secure API key handling
pub struct OpenAiCompatibleProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiCompatibleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleProvider")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl OpenAiCompatibleProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ProjdocError::Config(
                    "API key not found. Set GROQ_API_KEY or llm.api_key in config".to_string(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProjdocError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key.to_string()),
            endpoint: chat_completions_url(&config.api_base),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: llm::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    fn malformed(&self, detail: String) -> ProjdocError {
        CompletionError::with_provider(ErrorCategory::Transient, detail, PROVIDER_NAME).into()
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );

        let start_time = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;

        if !status.is_success() {
            return Err(
                ErrorClassifier::classify_http_status(status.as_u16(), &body, PROVIDER_NAME).into(),
            );
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            self.malformed(format!(
                "Failed to parse response ({}): {}",
                e,
                truncate_chars(&body, BODY_EXCERPT_CHARS)
            ))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                self.malformed(format!(
                    "No content in response: {}",
                    truncate_chars(&body, BODY_EXCERPT_CHARS)
                ))
            })?;

        debug!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Received completion"
        );

        Ok(strip_reasoning(&content))
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// `{base}/chat/completions`, unless the base already names the endpoint
fn chat_completions_url(api_base: &str) -> String {
    let base = api_base.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else {
        format!("{}/chat/completions", base)
    }
}

/// Remove `<think>…</think>` blocks and surrounding whitespace
fn strip_reasoning(content: &str) -> String {
    match THINK_BLOCK.as_ref() {
        Some(re) => re.replace_all(content, "").trim().to_string(),
        None => content.trim().to_string(),
    }
}

/// Failures below HTTP (timeout, connect, request, body) are Transient.
///
/// Their text embeds the request URL, so it never goes through the message
/// heuristics; it is kept verbatim as the error detail.
fn transport_error(err: &reqwest::Error) -> ProjdocError {
    let detail = transport_detail(err);
    if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        CompletionError::with_provider(ErrorCategory::Transient, detail, PROVIDER_NAME).into()
    } else {
        ErrorClassifier::classify(&detail, PROVIDER_NAME).into()
    }
}

/// Transport failures carry their kind so timeouts stay recognizable in logs
fn transport_detail(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        format!("request failed: {}", err)
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
