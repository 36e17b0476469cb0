//! HTTP-level tests over the full router with a stubbed completion
//! backend and a tempfile-backed store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;

use askd::api::{AppState, create_router};
use askd::history::{ConversationRepository, QueryService};
use askd::provider::{CompletionProvider, ProviderError};

/// Scripted outcome for the stub backend.
enum Script {
    Reply(&'static str),
    EmptyContent,
    HttpError {
        status: u16,
        message: &'static str,
    },
}

struct StubProvider {
    script: Script,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn answer(&self, _question: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(text) => Ok(text.to_string()),
            Script::EmptyContent => Ok(String::new()),
            Script::HttpError { status, message } => Err(ProviderError::Status {
                status: *status,
                message: message.to_string(),
            }),
        }
    }
}

struct Harness {
    _temp: TempDir,
    server: TestServer,
    repo: ConversationRepository,
    provider_calls: Arc<AtomicUsize>,
}

async fn harness(script: Script, expose_upstream_errors: bool) -> Harness {
    let temp = TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp.path().join("askd.db").display());
    let pool = askd::db::connect(&url).await.unwrap();
    let repo = ConversationRepository::new(pool);

    let calls = Arc::new(AtomicUsize::new(0));
    let provider: Arc<dyn CompletionProvider> = Arc::new(StubProvider {
        script,
        calls: Arc::clone(&calls),
    });

    let state = AppState::new(
        QueryService::new(provider, repo.clone()),
        expose_upstream_errors,
    );

    Harness {
        _temp: temp,
        server: TestServer::new(create_router(state)).unwrap(),
        repo,
        provider_calls: calls,
    }
}

#[tokio::test]
async fn answer_flow_persists_the_exchange() {
    let h = harness(Script::Reply("4"), false).await;

    let response = h
        .server
        .post("/query")
        .json(&json!({"question": "What is 2+2?"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"answer": "4"}));
    assert_eq!(h.provider_calls.load(Ordering::SeqCst), 1);

    let listing = h.server.get("/conversations").await;
    assert_eq!(listing.status_code(), StatusCode::OK);
    assert_eq!(
        listing.json::<Value>(),
        json!([{"question": "What is 2+2?", "answer": "4"}])
    );
    assert_eq!(h.repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn provider_failure_returns_500_and_writes_nothing() {
    let h = harness(
        Script::HttpError {
            status: 502,
            message: "connection refused",
        },
        false,
    )
    .await;

    let response = h
        .server
        .post("/query")
        .json(&json!({"question": "anything"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "Internal Server Error"})
    );
    assert_eq!(h.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn empty_completion_is_a_failure() {
    let h = harness(Script::EmptyContent, false).await;

    let response = h
        .server
        .post("/query")
        .json(&json!({"question": "anything"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(h.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn empty_question_is_rejected_before_the_provider() {
    let h = harness(Script::Reply("unused"), false).await;

    let response = h
        .server
        .post("/query")
        .json(&json!({"question": "   "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "question must not be empty"})
    );
    assert_eq!(h.provider_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn listing_is_newest_first() {
    let h = harness(Script::Reply("unused"), false).await;

    h.repo.append("A", "1").await.unwrap();
    h.repo.append("B", "2").await.unwrap();

    let listing = h.server.get("/conversations").await;
    assert_eq!(listing.status_code(), StatusCode::OK);
    assert_eq!(
        listing.json::<Value>(),
        json!([
            {"question": "B", "answer": "2"},
            {"question": "A", "answer": "1"}
        ])
    );
}

#[tokio::test]
async fn empty_history_lists_as_empty_array() {
    let h = harness(Script::Reply("unused"), false).await;

    let listing = h.server.get("/conversations").await;
    assert_eq!(listing.status_code(), StatusCode::OK);
    assert_eq!(listing.json::<Value>(), json!([]));
}

#[tokio::test]
async fn delete_reports_count_then_history_is_empty() {
    let h = harness(Script::Reply("unused"), false).await;

    for i in 0..3 {
        h.repo
            .append(&format!("q{i}"), &format!("a{i}"))
            .await
            .unwrap();
    }

    let response = h.server.delete("/conversations").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"deleted_count": 3}));

    let listing = h.server.get("/conversations").await;
    assert_eq!(listing.json::<Value>(), json!([]));
}

#[tokio::test]
async fn delete_on_empty_history_reports_zero() {
    let h = harness(Script::Reply("unused"), false).await;

    let response = h.server.delete("/conversations").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"deleted_count": 0}));
}

#[tokio::test]
async fn upstream_error_detail_is_generic_by_default() {
    let h = harness(
        Script::HttpError {
            status: 429,
            message: "model overloaded",
        },
        false,
    )
    .await;

    let response = h
        .server
        .post("/query")
        .json(&json!({"question": "anything"}))
        .await;

    let detail = response.json::<Value>()["detail"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(detail, "Internal Server Error");
}

#[tokio::test]
async fn upstream_error_detail_is_surfaced_when_enabled() {
    let h = harness(
        Script::HttpError {
            status: 429,
            message: "model overloaded",
        },
        true,
    )
    .await;

    let response = h
        .server
        .post("/query")
        .json(&json!({"question": "anything"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = response.json::<Value>()["detail"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(detail.contains("429"));
    assert!(detail.contains("model overloaded"));
}

#[tokio::test]
async fn health_reports_ok() {
    let h = harness(Script::Reply("unused"), false).await;

    let response = h.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "ok"}));
}
