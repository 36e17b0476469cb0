//! Non-streaming chat client for a local Ollama runner.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionProvider, ProviderError, SYSTEM_PROMPT, sanitize_upstream};

/// Completion backend talking to a local Ollama runner.
pub struct OllamaProvider {
    http: Client,
    base: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaProvider {
    /// Create a new client for the runner at `base_url`.
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http: Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    async fn answer(&self, question: &str) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: question,
                },
            ],
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/api/chat", self.base))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: sanitize_upstream(&text),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        content_of(parsed)
    }
}

/// Pull the answer text out of a parsed response, rejecting empty
/// content.
fn content_of(response: ChatResponse) -> Result<String, ProviderError> {
    let content = response.message.map(|m| m.content).unwrap_or_default();
    if content.trim().is_empty() {
        return Err(ProviderError::EmptyAnswer);
    }
    Ok(content)
}
