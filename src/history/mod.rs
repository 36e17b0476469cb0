//! Conversation history: records, store access, and request
//! orchestration.

mod models;
mod repository;
mod service;

pub use models::{Conversation, ConversationView};
pub use repository::{ConversationRepository, StoreError};
pub use service::{QueryError, QueryService};
