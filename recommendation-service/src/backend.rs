use std::sync::Arc;

use async_trait::async_trait;
use rig::agent::Agent;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openrouter;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{LlmConfig, LlmProvider};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Generative backend is not configured")]
    NotConfigured,

    #[error("Request to generative backend failed: {0}")]
    Transport(String),

    #[error("Generative backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode backend response: {0}")]
    Decode(String),

    #[error("Backend response contained no text content")]
    EmptyResponse,
}

/// A large-language-model service that answers a single prompt with text.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, BackendError>;
}

/// OpenRouter chat completion through a rig agent
pub struct OpenRouterBackend {
    agent: Agent<openrouter::CompletionModel>,
}

impl OpenRouterBackend {
    pub fn new(api_key: &str, model: &str, max_tokens: u64) -> Self {
        let client = openrouter::Client::new(api_key);
        let agent = client.agent(model).max_tokens(max_tokens).build();
        Self { agent }
    }
}

#[async_trait]
impl GenerativeBackend for OpenRouterBackend {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        self.agent
            .prompt(prompt)
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }
}

/// Client for a Messages-style API whose responses hold a list of content blocks.
pub struct MessagesBackend {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u64,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first content block; that block is the model's answer.
    pub fn into_text(self) -> Result<String, BackendError> {
        self.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(BackendError::EmptyResponse)
    }
}

impl MessagesBackend {
    pub fn new(config: &LlmConfig, api_key: &str) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            url: config.messages_api_url.clone(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl GenerativeBackend for MessagesBackend {
    fn name(&self) -> &str {
        "messages"
    }

    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?
            .into_text()
    }
}

/// Stand-in used when no API key is configured.
pub struct DisabledBackend;

#[async_trait]
impl GenerativeBackend for DisabledBackend {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, BackendError> {
        Err(BackendError::NotConfigured)
    }
}

/// Build the backend selected by the configuration.
pub fn from_config(config: &LlmConfig) -> Result<Arc<dyn GenerativeBackend>, BackendError> {
    let Some(api_key) = config.api_key.as_deref() else {
        warn!(
            provider = ?config.provider,
            "No API key configured, all recommendations will use the keyword fallback"
        );
        return Ok(Arc::new(DisabledBackend));
    };

    info!(provider = ?config.provider, model = %config.model, "Configuring generative backend");
    let backend: Arc<dyn GenerativeBackend> = match config.provider {
        LlmProvider::OpenRouter => Arc::new(OpenRouterBackend::new(
            api_key,
            &config.model,
            config.max_tokens,
        )),
        LlmProvider::Messages => Arc::new(MessagesBackend::new(config, api_key)?),
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    #[test]
    fn test_first_content_block_is_the_answer() {
        let body: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "content": [
                { "type": "text", "text": "[{\"bookId\":\"2\"}]" },
                { "type": "text", "text": "ignored" }
            ]
        }))
        .unwrap();
        assert_eq!(body.into_text().unwrap(), "[{\"bookId\":\"2\"}]");
    }

    #[test]
    fn test_missing_content_is_an_error() {
        let body: MessagesResponse = serde_json::from_value(json!({ "content": [] })).unwrap();
        assert!(matches!(body.into_text(), Err(BackendError::EmptyResponse)));

        let body: MessagesResponse =
            serde_json::from_value(json!({ "content": [{ "type": "tool_use" }] })).unwrap();
        assert!(matches!(body.into_text(), Err(BackendError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_missing_key_disables_backend() {
        let config = ServiceConfig::from_lookup(|_| None).unwrap();
        let backend = from_config(&config.llm).unwrap();

        assert_eq!(backend.name(), "disabled");
        assert!(matches!(
            backend.complete("hello").await,
            Err(BackendError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_messages_backend_reports_transport_errors() {
        let config = ServiceConfig::from_lookup(|key| match key {
            "LLM_PROVIDER" => Some("messages".into()),
            "ANTHROPIC_API_KEY" => Some("sk-test".into()),
            // Nothing listens on port 9 of the loopback interface
            "MESSAGES_API_URL" => Some("http://127.0.0.1:9/v1/messages".into()),
            "LLM_TIMEOUT_SECS" => Some("2".into()),
            _ => None,
        })
        .unwrap();
        let backend = from_config(&config.llm).unwrap();

        assert_eq!(backend.name(), "messages");
        assert!(matches!(
            backend.complete("hello").await,
            Err(BackendError::Transport(_))
        ));
    }
}
