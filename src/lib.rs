//! Question answering backend with persistent conversation history.
//!
//! Forwards a user's question to a completion backend (local Ollama
//! runner or an OpenAI-compatible cloud API), persists the
//! question/answer pair in SQLite, and exposes read/delete access to
//! the history over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod history;
pub mod provider;
