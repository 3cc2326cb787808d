#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use blog_service::config::{BlogConfig, StoreBackend};
use blog_service::services::InMemoryStore;
use blog_service::startup::{build_router, AppState, Application};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

/// Router backed by a fresh in-memory store.
pub fn test_router() -> Router {
    build_router(AppState::new(Arc::new(InMemoryStore::new())))
}

/// Send a request through the router and decode the JSON body (`Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };
    (status, value)
}

pub fn sample_post() -> Value {
    json!({
        "title": "Ownership in practice",
        "author": { "firstName": "Ferris", "lastName": "Crab" },
        "content": "Every value has a single owner."
    })
}

/// Create `body` and return the assigned identifier.
pub async fn create(app: &Router, body: Value) -> String {
    let (status, created) = send(app, Method::POST, "/blog-posts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_str().expect("missing id").to_string()
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the full server on a random port with the in-memory store.
    pub async fn spawn() -> Self {
        let mut config = BlogConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.store.backend = StoreBackend::Memory;

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
