//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use user_service::config::ServiceConfig;
use user_service::http::build_router;
use user_service::users::{MemoryUserStore, NewUser, StoreError, User, UserId, UserStore};

/// Router over the given store with default config.
pub fn app_with(store: Arc<dyn UserStore>) -> Router {
    build_router(&ServiceConfig::default(), store)
}

/// Router over the given store with a custom config.
#[allow(dead_code)]
pub fn app_with_config(config: &ServiceConfig, store: Arc<dyn UserStore>) -> Router {
    build_router(config, store)
}

/// Router over a fresh in-memory store.
pub fn app() -> Router {
    app_with(Arc::new(MemoryUserStore::new()))
}

/// Send one request and decode the JSON response body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Send a body without a `Content-Type` header.
#[allow(dead_code)]
pub async fn send_untyped(
    app: &Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Create a user through the API and return its id.
#[allow(dead_code)]
pub async fn create(app: &Router, name: &str, email: &str) -> String {
    let body = serde_json::json!({ "name": name, "email": email }).to_string();
    let (status, json) = send(app, Method::POST, "/users", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

/// A store whose every call fails.
#[allow(dead_code)]
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn insert(&self, _user: &NewUser) -> Result<UserId, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<User, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn replace_fields(&self, _id: &UserId, _name: &str, _email: &str) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _id: &UserId) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// Wraps an in-memory store and counts every call that reaches it.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryUserStore,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> usize {
        self.inner.len()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn insert(&self, user: &NewUser) -> Result<UserId, StoreError> {
        self.hit();
        self.inner.insert(user).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, StoreError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn replace_fields(&self, id: &UserId, name: &str, email: &str) -> Result<u64, StoreError> {
        self.hit();
        self.inner.replace_fields(id, name, email).await
    }

    async fn delete(&self, id: &UserId) -> Result<u64, StoreError> {
        self.hit();
        self.inner.delete(id).await
    }
}

/// A store whose calls never complete.
#[allow(dead_code)]
pub struct StallingStore;

#[async_trait]
impl UserStore for StallingStore {
    async fn insert(&self, _user: &NewUser) -> Result<UserId, StoreError> {
        std::future::pending().await
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<User, StoreError> {
        std::future::pending().await
    }

    async fn replace_fields(&self, _id: &UserId, _name: &str, _email: &str) -> Result<u64, StoreError> {
        std::future::pending().await
    }

    async fn delete(&self, _id: &UserId) -> Result<u64, StoreError> {
        std::future::pending().await
    }
}
