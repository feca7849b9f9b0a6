//! End-to-end tests against a live protected server

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use csrf::CsrfConfig;
use serde_json::{Value, json};

use crate::{ClientError, CsrfClient, TokenCache};

#[derive(Debug, Default)]
struct Counters {
    token_fetches: AtomicUsize,
    order_hits: AtomicUsize,
    forbidden_hits: AtomicUsize,
}

impl Counters {
    fn token_fetches(&self) -> usize {
        self.token_fetches.load(Ordering::SeqCst)
    }

    fn order_hits(&self) -> usize {
        self.order_hits.load(Ordering::SeqCst)
    }

    fn forbidden_hits(&self) -> usize {
        self.forbidden_hits.load(Ordering::SeqCst)
    }
}

async fn create_order(
    State(counters): State<Arc<Counters>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    counters.order_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "received": body }))
}

async fn list_orders() -> Json<Value> {
    Json(json!({ "orders": [] }))
}

async fn touch_order(State(counters): State<Arc<Counters>>) -> StatusCode {
    counters.order_hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

async fn always_forbidden(State(counters): State<Arc<Counters>>) -> StatusCode {
    counters.forbidden_hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::FORBIDDEN
}

async fn count_token_fetches(
    State(counters): State<Arc<Counters>>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path().ends_with("/csrf-token") {
        counters.token_fetches.fetch_add(1, Ordering::SeqCst);
    }
    next.run(request).await
}

async fn spawn_server(config: CsrfConfig) -> (String, Arc<Counters>) {
    let counters = Arc::new(Counters::default());

    let routes = Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route(
            "/orders/{id}",
            put(touch_order).patch(touch_order).delete(touch_order),
        )
        .route("/always-forbidden", post(always_forbidden))
        .route("/forbidden-read", get(always_forbidden))
        .with_state(counters.clone());

    let app = csrf::with_csrf_protection(routes, config).layer(middleware::from_fn_with_state(
        counters.clone(),
        count_token_fetches,
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), counters)
}

#[tokio::test]
async fn test_first_mutation_fetches_token_once() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let client = CsrfClient::new(&base).unwrap();

    let response = client.post("/orders", &json!({ "item": "tea" })).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["received"]["item"], "tea");

    assert_eq!(counters.token_fetches(), 1);
    assert_eq!(counters.order_hits(), 1);
    assert!(!client.cache().is_empty());

    // Cached token is reused
    let response = client.post("/orders", &json!({ "item": "coffee" })).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counters.token_fetches(), 1);
    assert_eq!(counters.order_hits(), 2);
}

#[tokio::test]
async fn test_safe_requests_never_fetch_token() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let client = CsrfClient::new(&base).unwrap();

    let response = client.get("/orders").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(counters.token_fetches(), 0);
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn test_all_mutating_verbs_carry_token() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let client = CsrfClient::new(&base).unwrap();

    let put = client.put("/orders/1", &json!({ "qty": 2 })).await.unwrap();
    let patch = client.patch("/orders/1", &json!({ "qty": 3 })).await.unwrap();
    let delete = client.delete("/orders/1").await.unwrap();

    assert_eq!(put.status(), StatusCode::NO_CONTENT);
    assert_eq!(patch.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);
    assert_eq!(counters.order_hits(), 3);
    assert_eq!(counters.token_fetches(), 1);
}

#[tokio::test]
async fn test_stale_token_is_refreshed_and_replayed() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let cache = Arc::new(TokenCache::new());

    let first = CsrfClient::with_cache(&base, cache.clone()).unwrap();
    first.post("/orders", &json!({ "n": 1 })).await.unwrap();
    let stale = cache.get().unwrap();

    // Fresh cookie jar, same cache: the cached token belongs to a session
    // this client no longer has.
    let second = CsrfClient::with_cache(&base, cache.clone()).unwrap();
    let response = second.post("/orders", &json!({ "n": 2 })).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counters.token_fetches(), 2);
    assert_eq!(counters.order_hits(), 2);
    assert_ne!(cache.get().unwrap(), stale);
}

#[tokio::test]
async fn test_expired_session_cookie_recovers() {
    let config = CsrfConfig::development().with_max_age(Duration::from_secs(1));
    let (base, counters) = spawn_server(config).await;
    let client = CsrfClient::new(&base).unwrap();

    client.post("/orders", &json!({ "n": 1 })).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2100)).await;

    let response = client.post("/orders", &json!({ "n": 2 })).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counters.token_fetches(), 2);
    assert_eq!(counters.order_hits(), 2);
}

#[tokio::test]
async fn test_persistent_forbidden_retries_exactly_once() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let client = CsrfClient::new(&base).unwrap();

    let err = client
        .post("/always-forbidden", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Rejected { status } if status == StatusCode::FORBIDDEN
    ));
    assert!(err.is_rejected());
    assert_eq!(err.to_string(), "request failed, please retry");
    assert_eq!(counters.forbidden_hits(), 2);
    assert_eq!(counters.token_fetches(), 2);
}

#[tokio::test]
async fn test_concurrent_first_mutations_both_succeed() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let client = CsrfClient::new(&base).unwrap();

    let body_a = json!({ "n": "a" });
    let body_b = json!({ "n": "b" });
    let (a, b) = tokio::join!(
        client.post("/orders", &body_a),
        client.post("/orders", &body_b)
    );

    assert_eq!(a.unwrap().status(), StatusCode::OK);
    assert_eq!(b.unwrap().status(), StatusCode::OK);
    assert_eq!(counters.order_hits(), 2);
    assert!(counters.token_fetches() >= 1);
}

#[tokio::test]
async fn test_token_endpoint_failure_surfaces() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let http = reqwest::Client::builder().cookie_store(true).build().unwrap();
    let client =
        CsrfClient::from_parts(http, &base, "/no-such-endpoint", Arc::new(TokenCache::new()))
            .unwrap();

    let err = client.post("/orders", &json!({})).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::TokenFetch { status } if status == StatusCode::NOT_FOUND
    ));
    assert_eq!(counters.order_hits(), 0);
}

#[tokio::test]
async fn test_refresh_token_overwrites_cache() {
    let (base, _counters) = spawn_server(CsrfConfig::development()).await;
    let client = CsrfClient::new(&base).unwrap();
    client.cache().set("outdated");

    let token = client.refresh_token().await.unwrap();

    assert_ne!(token, "outdated");
    assert_eq!(client.cache().get().as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn test_forbidden_safe_request_is_returned_untouched() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let client = CsrfClient::new(&base).unwrap();

    let response = client.get("/forbidden-read").await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(counters.forbidden_hits(), 1);
    assert_eq!(counters.token_fetches(), 0);
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn test_streaming_body_is_not_replayed() {
    let (base, counters) = spawn_server(CsrfConfig::development()).await;
    let client = CsrfClient::new(&base).unwrap();
    // No session cookie yet, so the cached token is rejected.
    client.cache().set("stale-token");

    let mut request = reqwest::Request::new(reqwest::Method::POST, client.url("/orders").unwrap());
    request.headers_mut().insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    *request.body_mut() = Some(reqwest::Body::wrap(String::from(r#"{"n":1}"#)));

    let err = client.execute(request).await.unwrap_err();

    assert!(matches!(err, ClientError::NotReplayable));
    assert!(err.is_rejected());
    assert_eq!(counters.order_hits(), 0);
    assert_eq!(counters.token_fetches(), 0);
}

#[tokio::test]
async fn test_custom_token_path() {
    let config = CsrfConfig::development().with_token_path("/api/csrf-token");
    let (base, counters) = spawn_server(config).await;

    let http = reqwest::Client::builder().cookie_store(true).build().unwrap();
    let client =
        CsrfClient::from_parts(http, &base, "/api/csrf-token", Arc::new(TokenCache::new()))
            .unwrap();

    let response = client.post("/orders", &json!({ "n": 1 })).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counters.token_fetches(), 1);
    assert_eq!(counters.order_hits(), 1);

    // The default path is no longer served
    let default = client.get("/csrf-token").await.unwrap();
    assert_eq!(default.status(), StatusCode::NOT_FOUND);
}
