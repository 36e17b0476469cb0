//! Chat-completions client for an OpenAI-compatible cloud API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionProvider, ProviderError, SYSTEM_PROMPT, sanitize_upstream};

/// Fixed sampling temperature for the cloud variant.
const TEMPERATURE: f32 = 0.7;

/// Completion backend talking to an OpenAI-compatible API.
pub struct OpenAiProvider {
    http: Client,
    base: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiProvider {
    /// Create a new client for the API at `base_url`.
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
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
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: sanitize_upstream(&upstream_message(&text)),
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
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();
    if content.trim().is_empty() {
        return Err(ProviderError::EmptyAnswer);
    }
    Ok(content)
}

/// Extract the vendor's error message from an error body, falling back
/// to the raw text when the body is not the documented shape.
fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_answer_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"4"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(content_of(parsed).unwrap(), "4");
    }

    #[test]
    fn no_choices_is_an_empty_answer() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            content_of(parsed),
            Err(ProviderError::EmptyAnswer)
        ));
    }

    #[test]
    fn null_content_is_an_empty_answer() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            content_of(parsed),
            Err(ProviderError::EmptyAnswer)
        ));
    }

    #[test]
    fn extracts_vendor_error_message() {
        let body = r#"{"error":{"message":"model overloaded","type":"server_error"}}"#;
        assert_eq!(upstream_message(body), "model overloaded");
        assert_eq!(upstream_message("plain text"), "plain text");
    }
}
