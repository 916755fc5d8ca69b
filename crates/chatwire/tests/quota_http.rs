//! Integration tests for the quota client and poller.
//!
//! These tests start a real axum server on a random port that plays the
//! backend's `GET /quota` endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use chatwire::PollerConfig;
use chatwire::quota::{PollOutcome, QuotaClient, QuotaPoller, new_store, quota_value, set_quota};

/// Fake backend: counts hits and answers with a canned reply.
struct Backend {
    hits: AtomicUsize,
    reply: Mutex<(StatusCode, String)>,
}

impl Backend {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn reply_with(&self, status: StatusCode, body: &str) {
        *self.reply.lock().unwrap() = (status, body.to_string());
    }
}

async fn quota_handler(State(backend): State<Arc<Backend>>) -> (StatusCode, String) {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    backend.reply.lock().unwrap().clone()
}

/// Helper: spawn a backend on port 0 and return it with its base URL.
async fn spawn_backend(status: StatusCode, body: &str) -> (Arc<Backend>, String) {
    let backend = Arc::new(Backend {
        hits: AtomicUsize::new(0),
        reply: Mutex::new((status, body.to_string())),
    });
    let app = Router::new()
        .route("/quota", get(quota_handler))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (backend, format!("http://{addr}"))
}

fn config(base: &str) -> PollerConfig {
    PollerConfig::new(base).with_request_timeout(Duration::from_secs(5))
}

// ── Client ───────────────────────────────────────────────────────────

#[tokio::test]
async fn client_reads_quota() {
    let (backend, base) = spawn_backend(StatusCode::OK, r#"{"status":true,"quota":12.5}"#).await;
    let client = QuotaClient::from_config(&config(&base)).unwrap();

    let resp = client.fetch_quota().await.unwrap();
    assert!(resp.status);
    assert_eq!(resp.quota, Some(12.5));
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn client_reports_http_errors() {
    let (_backend, base) = spawn_backend(StatusCode::SERVICE_UNAVAILABLE, "down").await;
    let client = QuotaClient::new(&base).unwrap();

    let err = client.fetch_quota().await.unwrap_err();
    assert!(err.contains("HTTP 503"), "{err}");
}

#[tokio::test]
async fn client_reports_malformed_body() {
    let (_backend, base) = spawn_backend(StatusCode::OK, "<html>login</html>").await;
    let client = QuotaClient::new(&base).unwrap();

    let err = client.fetch_quota().await.unwrap_err();
    assert!(err.contains("malformed quota response"), "{err}");
}

#[tokio::test]
async fn client_reports_connection_errors() {
    // Grab a free port, then close it again.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = QuotaClient::new(format!("http://{addr}")).unwrap();
    let err = client.fetch_quota().await.unwrap_err();
    assert!(err.starts_with("quota request failed"), "{err}");
}

// ── Poller ───────────────────────────────────────────────────────────

#[tokio::test]
async fn poller_publishes_quota_and_suppresses_repeat() {
    let (backend, base) = spawn_backend(StatusCode::OK, r#"{"status":true,"quota":8}"#).await;
    let cfg = config(&base);
    let client = QuotaClient::from_config(&cfg).unwrap();
    let store = new_store();
    let poller = QuotaPoller::new(client, store.clone(), cfg);

    assert_eq!(poller.poll_once().await, PollOutcome::Updated(8.0));
    assert_eq!(poller.poll_once().await, PollOutcome::Skipped);
    assert_eq!(backend.hits(), 1);
    assert_eq!(quota_value(&store), 8.0);
}

#[tokio::test]
async fn poller_requests_again_after_cooldown() {
    let (backend, base) = spawn_backend(StatusCode::OK, r#"{"status":true,"quota":1}"#).await;
    let cfg = config(&base).with_cooldown(Duration::from_millis(50));
    let client = QuotaClient::from_config(&cfg).unwrap();
    let store = new_store();
    let poller = QuotaPoller::new(client, store.clone(), cfg);

    poller.poll_once().await;
    backend.reply_with(StatusCode::OK, r#"{"status":true,"quota":2}"#);
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(poller.poll_once().await, PollOutcome::Updated(2.0));
    assert_eq!(backend.hits(), 2);
    assert_eq!(quota_value(&store), 2.0);
}

#[tokio::test]
async fn poller_ignores_rejections_and_errors() {
    let (backend, base) = spawn_backend(StatusCode::OK, r#"{"status":false}"#).await;
    let cfg = config(&base).with_cooldown(Duration::ZERO);
    let client = QuotaClient::from_config(&cfg).unwrap();
    let store = new_store();
    set_quota(&store, 4.0);
    let poller = QuotaPoller::new(client, store.clone(), cfg);

    assert_eq!(poller.poll_once().await, PollOutcome::Rejected);

    backend.reply_with(StatusCode::INTERNAL_SERVER_ERROR, "oops");
    assert!(matches!(poller.poll_once().await, PollOutcome::Failed(_)));

    backend.reply_with(StatusCode::OK, r#"{"status":true,"quota":"lots"}"#);
    assert!(matches!(poller.poll_once().await, PollOutcome::Failed(_)));

    assert_eq!(quota_value(&store), 4.0);
    assert_eq!(backend.hits(), 3);
}

#[tokio::test]
async fn pollers_sharing_a_guard_issue_one_request_per_window() {
    let (backend, base) = spawn_backend(StatusCode::OK, r#"{"status":true,"quota":3}"#).await;
    let cfg = config(&base)
        .with_interval(Duration::from_millis(10))
        .with_cooldown(Duration::from_millis(200));
    let store = new_store();

    let first = QuotaPoller::new(
        QuotaClient::from_config(&cfg).unwrap(),
        store.clone(),
        cfg.clone(),
    );
    let second = QuotaPoller::new(
        QuotaClient::from_config(&cfg).unwrap(),
        store.clone(),
        cfg.clone(),
    )
    .with_guard(first.guard().clone());

    let a = first.start();
    let b = second.start();
    tokio::time::sleep(Duration::from_millis(300)).await;
    a.stop().await;
    b.stop().await;

    let hits = backend.hits();
    assert!((1..=2).contains(&hits), "expected at most 2 requests, got {hits}");
    assert_eq!(quota_value(&store), 3.0);
}
