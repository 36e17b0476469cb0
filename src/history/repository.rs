//! Repository for conversation store operations.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use super::models::Conversation;

/// Errors raised by the conversation store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conversation store failure: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository for conversation records.
#[derive(Clone)]
pub struct ConversationRepository {
    pool: SqlitePool,
}

impl ConversationRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a question/answer pair.
    ///
    /// Callers must only invoke this after a completion succeeded with
    /// non-empty content; the store never holds partial records.
    pub async fn append(&self, question: &str, answer: &str) -> Result<Conversation, StoreError> {
        let created_at = Utc::now().to_rfc3339();

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO conversations (question, answer, created_at)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(question)
        .bind(answer)
        .bind(&created_at)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Get a conversation by ID.
    async fn get_by_id(&self, id: i64) -> Result<Conversation, StoreError> {
        Ok(sqlx::query_as::<_, Conversation>(
            "SELECT id, question, answer, created_at FROM conversations WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?)
    }

    /// All conversations, newest first.
    ///
    /// Ordered by id rather than timestamp: two appends within the same
    /// clock instant must still list in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Conversation>, StoreError> {
        Ok(sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, question, answer, created_at
            FROM conversations
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    /// Delete every conversation and return how many were removed.
    pub async fn delete_all(&self) -> Result<i64, StoreError> {
        let result = sqlx::query("DELETE FROM conversations")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() as i64)
    }

    /// Count persisted conversations.
    pub async fn count(&self) -> Result<i64, StoreError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM conversations")
                .fetch_one(&self.pool)
                .await?,
        )
    }
}
