//! Anthropic Messages API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commit::GenerationRequest;
use crate::config::Config;
use crate::error::GenerationError;

/// Production endpoint host.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Messages API path, appended to the base URL.
const MESSAGES_PATH: &str = "/v1/messages";

/// Value of the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

/// Model used for every request.
pub const MODEL: &str = "claude-sonnet-4-5";

/// Upper bound on generated tokens; a commit message is short.
pub const MAX_TOKENS: u32 = 300;

/// Longest error body kept in [`GenerationError::HttpStatus`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// The proposed commit message: first text segment, trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult(String);

impl GenerationResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_message(self) -> String {
        self.0
    }
}

/// Trait for producing a commit message from a prompt.
///
/// This abstraction allows the pipeline to run against a stub backend in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Make exactly one generation attempt.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// HTTP client for the Messages API. Single attempt, no retry.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenerationError::ClientBuild)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: config.timeout,
        })
    }

    /// Point the client at a different host (e.g. a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MESSAGES_PATH)
    }

    fn transport_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.timeout.as_secs())
        } else {
            GenerationError::Transport(err)
        }
    }
}

#[async_trait]
impl MessageGenerator for AnthropicClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: request.prompt(),
            }],
        };

        debug!(
            "Sending request to Anthropic API ({} prompt chars)...",
            request.prompt().len()
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("content-type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!("Received response from API: HTTP {}", status.as_u16());

        if !status.is_success() {
            return Err(GenerationError::HttpStatus {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        parse_response(&text)
    }
}

/// Decode a Messages API response body into the proposed message.
///
/// A body that does not decode is malformed; a body that decodes to no text
/// (no segments, or a blank first segment) is an empty generation.
pub fn parse_response(body: &str) -> Result<GenerationResult, GenerationError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(GenerationError::MalformedResponse)?;

    let first = response
        .content
        .into_iter()
        .next()
        .ok_or(GenerationError::EmptyGeneration)?;

    let message = first.text.trim();
    if message.is_empty() {
        return Err(GenerationError::EmptyGeneration);
    }

    Ok(GenerationResult(message.to_string()))
}
