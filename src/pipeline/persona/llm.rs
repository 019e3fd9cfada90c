//! LLM collaborator: prompt in, text out.
//!
//! `ClaudeClient` talks to the Anthropic Messages API. Everything above it
//! depends only on the `LlmClient` trait.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::excerpt;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Characters of an upstream error body kept in the error message.
const ERROR_BODY_EXCERPT: usize = 200;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM API key missing or rejected")]
    Unauthorized,

    #[error("LLM provider rate limit reached")]
    RateLimited,

    #[error("LLM call failed: {0}")]
    Other(String),
}

/// A model that completes a single-turn prompt.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;
}

/// Anthropic Messages API client.
pub struct ClaudeClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ClaudeClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl LlmClient for ClaudeClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::Unauthorized)?;

        let url = format!("{}/v1/messages", self.base_url);
        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Other(format!("Request timed out after {}s", self.timeout_secs))
                } else if e.is_connect() {
                    LlmError::Other(format!("Cannot reach {}", self.base_url))
                } else {
                    LlmError::Other(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Other(format!("Response parsing: {e}")))?;

        first_text(parsed)
    }
}

/// Map a non-success HTTP status to the collaborator error taxonomy.
fn status_error(status: u16, body: &str) -> LlmError {
    match status {
        401 => LlmError::Unauthorized,
        429 => LlmError::RateLimited,
        _ => LlmError::Other(format!(
            "HTTP {status}: {}",
            excerpt(body, ERROR_BODY_EXCERPT)
        )),
    }
}

/// Text of the first content block.
fn first_text(response: MessagesResponse) -> Result<String, LlmError> {
    response
        .content
        .into_iter()
        .next()
        .filter(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| LlmError::Other("Response had no text content".into()))
}
