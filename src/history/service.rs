//! Query service binding one HTTP request to provider and store calls.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::provider::{CompletionProvider, ProviderError};

use super::models::Conversation;
use super::repository::{ConversationRepository, StoreError};

/// Errors raised while handling a single query.
///
/// The HTTP boundary performs the one translation to a status code and
/// client-facing message.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service orchestrating the answer, list, and delete flows.
pub struct QueryService {
    provider: Arc<dyn CompletionProvider>,
    repo: ConversationRepository,
}

impl QueryService {
    /// Create a new service instance.
    pub fn new(provider: Arc<dyn CompletionProvider>, repo: ConversationRepository) -> Self {
        Self { provider, repo }
    }

    /// Answer a question and persist the pair.
    ///
    /// The store write is strictly ordered after a successful
    /// completion; a failed or empty completion leaves the store
    /// untouched.
    pub async fn ask(&self, question: &str) -> Result<String, QueryError> {
        info!(question = %question, "answering question");

        let answer = self.provider.answer(question).await?;
        if answer.trim().is_empty() {
            return Err(QueryError::Provider(ProviderError::EmptyAnswer));
        }

        let record = self.repo.append(question, &answer).await?;
        debug!(id = record.id, answer_len = answer.len(), "conversation persisted");

        Ok(answer)
    }

    /// All persisted conversations, newest first.
    pub async fn conversations(&self) -> Result<Vec<Conversation>, QueryError> {
        Ok(self.repo.list_all().await?)
    }

    /// Delete the whole history and return the removed count.
    pub async fn clear(&self) -> Result<i64, QueryError> {
        let deleted = self.repo.delete_all().await?;
        info!(deleted, "conversation history cleared");
        Ok(deleted)
    }
}
