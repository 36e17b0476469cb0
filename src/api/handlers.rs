//! Request handlers for the query and history endpoints.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::history::{ConversationView, QueryError};
use crate::provider::ProviderError;

use super::error::{ApiError, ApiResult};
use super::state::AppState;

/// Request to answer a question.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

/// Response carrying the answer text.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
}

/// Response for history deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted_count: i64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Answer a question and persist the exchange.
///
/// POST /query
pub async fn ask_question(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<QueryResponse>> {
    if req.question.trim().is_empty() {
        return Err(ApiError::bad_request("question must not be empty"));
    }

    let answer = state
        .query
        .ask(&req.question)
        .await
        .map_err(|e| answer_failure(&state, e))?;

    Ok(Json(QueryResponse { answer }))
}

/// List the persisted history, newest first.
///
/// GET /conversations
pub async fn list_conversations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ConversationView>>> {
    let records = state.query.conversations().await.map_err(|e| {
        error!(error = %e, "failed to list conversations");
        ApiError::internal("Could not fetch conversations")
    })?;

    Ok(Json(
        records.into_iter().map(ConversationView::from).collect(),
    ))
}

/// Delete the whole history.
///
/// DELETE /conversations
pub async fn delete_conversations(
    State(state): State<AppState>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted_count = state.query.clear().await.map_err(|e| {
        error!(error = %e, "failed to delete conversations");
        ApiError::internal("Could not delete conversations")
    })?;

    Ok(Json(DeleteResponse { deleted_count }))
}

/// Health check.
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Translate an answer-flow failure into the client-facing response.
///
/// The full cause is logged here; the client sees a generic message.
/// When the exposure flag is on and the provider answered with an HTTP
/// error status, its sanitized message is included in the detail.
fn answer_failure(state: &AppState, err: QueryError) -> ApiError {
    error!(error = %err, "failed to answer question");

    if state.expose_upstream_errors {
        if let QueryError::Provider(ProviderError::Status { status, message }) = &err {
            return ApiError::internal(format!("completion API returned {status}: {message}"));
        }
    }

    ApiError::internal("Internal Server Error")
}
