mod helpers;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use helpers::{refused_url, spawn_server, test_client};
use raggadon::cli::save::save_message;
use raggadon::client::{ClientError, Role};

fn slow_router() -> Router {
    async fn slow() -> Json<Value> {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        Json(json!({"status": "healthy", "success": true, "results": []}))
    }
    Router::new()
        .route("/health", get(slow))
        .route("/save", post(slow))
        .route("/search", get(slow))
        .route("/project/{project}/stats", get(slow))
}

#[tokio::test]
async fn health_true_for_json_answer() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({"status": "healthy", "service": "Raggadon RAG-Middleware"})) }),
    );
    let url = spawn_server(router).await;

    assert!(test_client(&url).health_check().await);
}

#[tokio::test]
async fn health_false_when_refused() {
    assert!(!test_client(&refused_url()).health_check().await);
}

#[tokio::test]
async fn health_false_on_timeout() {
    let url = spawn_server(slow_router()).await;
    assert!(!test_client(&url).health_check().await);
}

#[tokio::test]
async fn health_false_on_malformed_body() {
    let router = Router::new().route("/health", get(|| async { "<html>proxy</html>" }));
    let url = spawn_server(router).await;

    assert!(!test_client(&url).health_check().await);
}

#[tokio::test]
async fn health_false_on_error_status() {
    let router = Router::new().route(
        "/health",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"detail": "starting"}))) }),
    );
    let url = spawn_server(router).await;

    assert!(!test_client(&url).health_check().await);
}

#[tokio::test]
async fn save_sends_project_role_and_content() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::default();
    let captured = Arc::clone(&seen);
    let router = Router::new().route(
        "/save",
        post(move |Json(body): Json<Value>| {
            let captured = Arc::clone(&captured);
            async move {
                *captured.lock().unwrap() = Some(body);
                Json(json!({"success": true, "tokens_used": 42, "message": "ok"}))
            }
        }),
    );
    let url = spawn_server(router).await;

    let receipt = test_client(&url).save("demo", Role::User, "hello").await.unwrap();

    assert_eq!(receipt.tokens_used, 42);
    assert_eq!(
        seen.lock().unwrap().clone().unwrap(),
        json!({"project": "demo", "role": "user", "content": "hello"})
    );
    assert_eq!(
        save_message("demo", &Ok(receipt)),
        "✅ Gespeichert für Projekt 'demo': 42 Tokens"
    );
}

#[tokio::test]
async fn save_reports_server_detail_on_failure() {
    let router = Router::new().route(
        "/save",
        post(|| async { Json(json!({"success": false, "detail": "quota exceeded"})) }),
    );
    let url = spawn_server(router).await;

    let result = test_client(&url).save("demo", Role::User, "hello").await;

    match &result {
        Err(ClientError::Application(detail)) => assert_eq!(detail, "quota exceeded"),
        other => panic!("expected application error, got {other:?}"),
    }
    assert!(save_message("demo", &result).contains("quota exceeded"));
}

#[tokio::test]
async fn save_failure_without_detail_uses_generic_label() {
    let router = Router::new().route("/save", post(|| async { Json(json!({"success": false})) }));
    let url = spawn_server(router).await;

    let err = test_client(&url).save("demo", Role::User, "x").await.unwrap_err();
    assert!(matches!(err, ClientError::Application(ref d) if d == "Unbekannter Fehler"));
}

#[tokio::test]
async fn save_http_error_surfaces_detail() {
    let router = Router::new().route(
        "/save",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "embedding service down"})),
            )
        }),
    );
    let url = spawn_server(router).await;

    let err = test_client(&url).save("demo", Role::User, "x").await.unwrap_err();
    assert!(matches!(err, ClientError::Application(ref d) if d == "embedding service down"));
}

#[tokio::test]
async fn save_refused_is_server_unavailable() {
    for content in ["hello", "", "a much longer payload with ümlauts"] {
        let err = test_client(&refused_url())
            .save("demo", Role::User, content)
            .await
            .unwrap_err();
        assert!(err.is_server_unavailable(), "got {err:?}");
    }
}

#[tokio::test]
async fn save_timeout_is_server_unavailable() {
    let url = spawn_server(slow_router()).await;
    let err = test_client(&url).save("demo", Role::User, "x").await.unwrap_err();
    assert!(err.is_server_unavailable(), "got {err:?}");
}

#[tokio::test]
async fn save_non_json_body_is_request_error() {
    let router = Router::new().route("/save", post(|| async { "saved!" }));
    let url = spawn_server(router).await;

    let err = test_client(&url).save("demo", Role::User, "x").await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn search_passes_project_and_query() {
    let router = Router::new().route(
        "/search",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            Json(json!({
                "results": [
                    {"content": format!("{} / {}", params["project"], params["query"]), "role": "user", "similarity": 0.91},
                    {"content": "second", "role": "assistant", "similarity": 0.42}
                ],
                "tokens_used": 3
            }))
        }),
    );
    let url = spawn_server(router).await;

    let results = test_client(&url).search("ars vivai", "api key & db").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].content, "ars vivai / api key & db");
    assert_eq!(results[0].role, "user");
    assert!((results[0].similarity - 0.91).abs() < f64::EPSILON);
    assert_eq!(results[1].content, "second");
}

#[tokio::test]
async fn search_without_results_key_is_empty() {
    let router = Router::new().route("/search", get(|| async { Json(json!({})) }));
    let url = spawn_server(router).await;

    let results = test_client(&url).search("demo", "anything").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_refused_is_server_unavailable() {
    let err = test_client(&refused_url()).search("demo", "q").await.unwrap_err();
    assert!(err.is_server_unavailable());
}

#[tokio::test]
async fn search_timeout_is_server_unavailable() {
    let url = spawn_server(slow_router()).await;
    let err = test_client(&url).search("demo", "q").await.unwrap_err();
    assert!(err.is_server_unavailable());
}

#[tokio::test]
async fn stats_decode_sparse_body() {
    let router = Router::new().route(
        "/project/{project}/stats",
        get(|Path(project): Path<String>| async move {
            Json(json!({
                "project": project,
                "total_memories": 7,
                "monthly_tokens": null,
                "model": "text-embedding-3-small",
                "recent_activities": [{"type": "save", "tokens": 12}]
            }))
        }),
    );
    let url = spawn_server(router).await;

    let stats = test_client(&url).project_stats("ars vivai").await.unwrap();

    assert_eq!(stats.total_memories, 7);
    assert_eq!(stats.monthly_tokens, 0);
    assert_eq!(stats.model_name(), "text-embedding-3-small");
    assert_eq!(stats.recent_activities[0].kind, "save");
}

#[tokio::test]
async fn stats_failures_mean_no_data_yet() {
    let router = Router::new().route(
        "/project/{project}/stats",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "no rows"}))) }),
    );
    let url = spawn_server(router).await;
    let err = test_client(&url).project_stats("fresh").await.unwrap_err();
    assert!(matches!(err, ClientError::NoDataYet), "got {err:?}");

    // Even a down server reads as "no data" here, not as an outage.
    let err = test_client(&refused_url()).project_stats("fresh").await.unwrap_err();
    assert!(matches!(err, ClientError::NoDataYet), "got {err:?}");

    let url = spawn_server(slow_router()).await;
    let err = test_client(&url).project_stats("fresh").await.unwrap_err();
    assert!(matches!(err, ClientError::NoDataYet), "got {err:?}");
}
