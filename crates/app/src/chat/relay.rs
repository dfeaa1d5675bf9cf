//! HTTP relay to an OpenAI-compatible chat completions endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatService, ChatServiceError};

/// Configuration for the assistant provider.
#[derive(Debug, Clone)]
pub struct ChatRelayConfig {
    /// Chat completions endpoint, e.g. `"https://api.openai.com/v1/chat/completions"`.
    pub api_url: String,

    /// Bearer token for the provider.
    pub api_key: String,

    /// Model name to request.
    pub model: String,
}

/// HTTP client relaying conversations to the provider.
#[derive(Debug, Clone)]
pub struct HttpChatRelay {
    config: ChatRelayConfig,
    http: Client,
}

impl HttpChatRelay {
    #[must_use]
    pub fn new(config: ChatRelayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ChatService for HttpChatRelay {
    async fn reply(&self, history: &[ChatMessage]) -> Result<ChatMessage, ChatServiceError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: history,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatServiceError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ChatServiceError::UnexpectedResponse(format!(
                "completion request failed with status {status}: {text}"
            )));
        }

        let parsed: CompletionResponse = response.json().await?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatServiceError::UnexpectedResponse("no choices".to_string()))?;

        Ok(choice.message)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}
