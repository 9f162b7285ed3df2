//! Chat-completion boundary for the hosted model.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ClassifyError;

pub const DEFAULT_MODEL: &str = "fiqa-mistral-7b-lora";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 256;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI-compatible `/v1/chat/completions` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Single user-turn request
    pub fn user(
        model: impl Into<String>,
        content: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: content.into(),
            }],
            temperature,
            max_tokens,
        }
    }

    /// Content of the last message, which carries the prompt
    pub fn prompt(&self) -> &str {
        self.messages.last().map(|m| m.content.as_str()).unwrap_or("")
    }
}

/// Anything that can turn a chat request into reply text
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ClassifyError>;
}

/// HTTP client for an OpenAI-compatible model host
#[derive(Debug, Clone)]
pub struct HttpCompletion {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpCompletion {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Completion for HttpCompletion {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ClassifyError> {
        let mut req = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            req = req.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        parse_completion_body(&body)
    }
}

/// Pull `choices[0].message.content` out of a completion response body
pub fn parse_completion_body(body: &str) -> Result<String, ClassifyError> {
    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: String,
    }

    let out: Resp =
        serde_json::from_str(body).map_err(|e| ClassifyError::MalformedBody(e.to_string()))?;
    out.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| ClassifyError::MalformedBody("no choices".to_string()))
}
