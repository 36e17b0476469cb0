//! Application state shared across handlers.

use std::sync::Arc;

use crate::history::QueryService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Query service binding provider and store.
    pub query: Arc<QueryService>,
    /// Whether upstream completion-API error messages may appear in
    /// failure responses. Default off; the full cause is always logged.
    pub expose_upstream_errors: bool,
}

impl AppState {
    /// Create new application state.
    pub fn new(query: QueryService, expose_upstream_errors: bool) -> Self {
        Self {
            query: Arc::new(query),
            expose_upstream_errors,
        }
    }
}
