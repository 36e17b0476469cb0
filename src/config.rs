//! Startup configuration.
//!
//! Every setting is a CLI flag with an environment fallback. Anything
//! clap cannot validate on its own (the conditional API-key
//! requirement) is checked before the server starts serving; an
//! invalid configuration exits the process with the cause logged.

use std::fmt;

use clap::{Parser, ValueEnum};
use thiserror::Error;

/// Errors raised while validating startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is required when the provider is 'openai'")]
    MissingApiKey,
}

/// Which completion backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Local Ollama runner
    Ollama,
    /// OpenAI-compatible cloud API
    #[value(name = "openai")]
    OpenAi,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "askd")]
#[command(about = "Question answering backend with persistent conversation history")]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "ASKD_PORT", default_value = "8000")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, env = "ASKD_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// SQLite URL for the conversation store (e.g. sqlite://askd.db)
    #[arg(long, env = "ASKD_DATABASE_URL")]
    pub database_url: String,

    /// Completion backend
    #[arg(long, env = "ASKD_PROVIDER", value_enum, default_value = "ollama")]
    pub provider: ProviderKind,

    /// Model identifier sent to the completion backend
    #[arg(long, env = "ASKD_MODEL", default_value = "mistral")]
    pub model: String,

    /// Base URL of the local Ollama runner
    #[arg(long, env = "ASKD_OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "ASKD_OPENAI_URL", default_value = "https://api.openai.com")]
    pub openai_url: String,

    /// API key for the openai provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Include upstream completion-API error messages in failure responses
    #[arg(long, env = "ASKD_EXPOSE_UPSTREAM_ERRORS")]
    pub expose_upstream_errors: bool,

    /// Enable verbose logging
    #[arg(short, long, env = "ASKD_VERBOSE")]
    pub verbose: bool,
}
