#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use college_api::{
    config::{AppConfig, IdStrategy, StoreBackend},
    AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret-that-is-long-enough-for-hs512";

/// Development preset over the in-memory store with a usable secret.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.store = StoreBackend::Memory;
    config.database.id_strategy = IdStrategy::StoreGenerated;
    config.api.enable_request_logging = false;
    config.security.jwt_secret = TEST_SECRET.to_string();
    config
}

/// A fresh app over a freshly seeded store.
pub fn app() -> Router {
    app_with(test_config())
}

pub fn app_with(config: AppConfig) -> Router {
    college_api::app(AppState::in_memory(config))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).with_context(|| format!("body is not JSON: {}", self.text()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Send one request through a clone of the router.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
    send_with_headers(app, method, uri, body, &[]).await
}

pub async fn send_with_headers(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await?.to_vec();

    Ok(TestResponse { status, headers, body })
}

pub async fn get(app: &Router, uri: &str) -> Result<TestResponse> {
    send(app, Method::GET, uri, None).await
}

/// Body of a freshly created student with the given name.
pub fn new_student(name: &str) -> Value {
    serde_json::json!({
        "studentName": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "address": "Hyd",
        "dob": "2001-05-20T00:00:00"
    })
}
