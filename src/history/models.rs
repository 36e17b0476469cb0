//! Conversation history data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted question/answer pair.
///
/// Immutable once written: created only by the answer flow, read in
/// bulk, destroyed only in bulk.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    /// Auto-incrementing ID; doubles as the insertion-order key
    pub id: i64,
    /// The user's question
    pub question: String,
    /// The completion backend's answer; never empty once persisted
    pub answer: String,
    /// RFC 3339 timestamp of the append
    pub created_at: String,
}

/// The API-facing view of a conversation.
///
/// Store-internal fields (id, created_at) are not exposed to API
/// consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationView {
    pub question: String,
    pub answer: String,
}

impl From<Conversation> for ConversationView {
    fn from(record: Conversation) -> Self {
        Self {
            question: record.question,
            answer: record.answer,
        }
    }
}
