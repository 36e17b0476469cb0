//! API route definitions.

use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Answer flow
        .route("/query", post(handlers::ask_question))
        // History access
        .route(
            "/conversations",
            get(handlers::list_conversations).delete(handlers::delete_conversations),
        )
        .with_state(state)
}
