mod common;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use blog_service::models::{BlogPost, BlogPostUpdate};
use blog_service::services::{init_metrics, BlogPostStore};
use blog_service::startup::{build_router, AppState};
use common::{send, TestApp};
use mongodb::bson::oid::ObjectId;
use reqwest::Client;
use serde_json::json;
use service_core::error::AppError;
use std::sync::Arc;

/// A store whose backend cannot be reached.
struct UnreachableStore;

fn unreachable() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(
        "No servers available: mongodb://db.internal:27017"
    ))
}

#[async_trait]
impl BlogPostStore for UnreachableStore {
    async fn list(&self) -> Result<Vec<BlogPost>, AppError> {
        Err(unreachable())
    }

    async fn get(&self, _id: ObjectId) -> Result<Option<BlogPost>, AppError> {
        Err(unreachable())
    }

    async fn create(&self, _post: BlogPost) -> Result<BlogPost, AppError> {
        Err(unreachable())
    }

    async fn update(&self, _id: ObjectId, _changes: BlogPostUpdate) -> Result<bool, AppError> {
        Err(unreachable())
    }

    async fn delete(&self, _id: ObjectId) -> Result<bool, AppError> {
        Err(unreachable())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(unreachable())
    }
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "blog-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    init_metrics().expect("Failed to install metrics recorder");
    let app = TestApp::spawn().await;
    let client = Client::new();

    // Generate at least one request so a counter exists.
    client
        .get(format!("{}/blog-posts", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    let response = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("Failed to get response body");
    assert!(body.contains("http_requests_total"), "Unexpected metrics: {}", body);
}

#[tokio::test]
async fn crud_round_trip_over_http() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/blog-posts", app.address))
        .json(&json!({
            "title": "Over the wire",
            "author": { "firstName": "Ferris" },
            "content": "Served by axum."
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);
    let created: serde_json::Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let response = client
        .put(format!("{}/blog-posts/{}", app.address, id))
        .json(&json!({ "id": id, "content": "Edited." }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let fetched: serde_json::Value = client
        .get(format!("{}/blog-posts/{}", app.address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["content"], "Edited.");
    assert_eq!(fetched["title"], "Over the wire");

    let response = client
        .delete(format!("{}/blog-posts/{}", app.address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{}/blog-posts/{}", app.address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn unhealthy_store_is_reported_without_details() {
    let app = build_router(AppState::new(Arc::new(UnreachableStore)));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "message": "Service unavailable" }));

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body.to_string().contains("db.internal"));
}

#[tokio::test]
async fn store_failures_collapse_to_internal_error() {
    let app = build_router(AppState::new(Arc::new(UnreachableStore)));

    let (status, body) = send(&app, Method::GET, "/blog-posts", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal server error" }));
}
