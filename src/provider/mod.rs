//! Completion provider backends.
//!
//! One capability, two interchangeable implementations selected by
//! configuration at startup: a local Ollama runner and an
//! OpenAI-compatible chat-completions API.

mod ollama;
mod openai;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Cli, ConfigError, ProviderKind};

/// The fixed instruction sent ahead of every user question.
const SYSTEM_PROMPT: &str = "Answer the user's question in a short and precise manner.";

/// Errors raised by a completion backend.
///
/// Every failure mode collapses here; callers never see
/// vendor-specific error types.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("completion API returned a malformed response: {0}")]
    Malformed(String),

    #[error("completion API returned an empty answer")]
    EmptyAnswer,
}

/// Minimal completion abstraction for testability.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the fixed system instruction plus `question` and return
    /// the answer text. Exactly one attempt; no retry.
    async fn answer(&self, question: &str) -> Result<String, ProviderError>;
}

/// Build the completion backend selected by configuration.
///
/// Fails when the openai variant is selected without a credential, so
/// the process refuses to start rather than failing on the first
/// request.
pub fn from_config(cli: &Cli) -> Result<Arc<dyn CompletionProvider>, ConfigError> {
    match cli.provider {
        ProviderKind::Ollama => Ok(Arc::new(OllamaProvider::new(&cli.ollama_url, &cli.model))),
        ProviderKind::OpenAi => {
            let api_key = cli
                .openai_api_key
                .as_deref()
                .ok_or(ConfigError::MissingApiKey)?;
            Ok(Arc::new(OpenAiProvider::new(
                &cli.openai_url,
                &cli.model,
                api_key,
            )))
        }
    }
}

/// Bound and flatten an upstream error body so it is safe to log or
/// surface.
fn sanitize_upstream(body: &str) -> String {
    const MAX_CHARS: usize = 200;

    let mut line = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > MAX_CHARS {
        line = line.chars().take(MAX_CHARS).collect();
        line.push_str("...");
    }
    line
}
