//! Request-handling contract for the user routes.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use user_service::config::ServiceConfig;

mod common;

use common::{
    app, app_with, app_with_config, create, send, send_untyped, CountingStore, FailingStore,
    StallingStore,
};

const MISSING_ID: &str = "507f1f77bcf86cd799439011";

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/users",
        Some(r#"{"name": "Ada", "email": "ada@example.com"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["email"], "ada@example.com");

    let (status, fetched) = send(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_accepts_empty_and_missing_fields() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/users", Some(r#"{"name": ""}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "");
    assert_eq!(created["email"], "");
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let app = app();

    let body = json!({ "id": MISSING_ID, "name": "Ada", "email": "a@x.com" }).to_string();
    let (status, created) = send(&app, Method::POST, "/users", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(created["id"], MISSING_ID);
}

#[tokio::test]
async fn test_invalid_id_is_bad_request_without_store_call() {
    let store = Arc::new(CountingStore::default());
    let app = app_with(store.clone());

    for raw in ["abc", "not-an-id", "zzzzzzzzzzzzzzzzzzzzzzzz", "507f1f77bcf86cd79943901"] {
        let uri = format!("/users/{}", raw);
        let body = Some(r#"{"name": "A", "email": "b@x.com"}"#);

        for (method, body) in [
            (Method::GET, None),
            (Method::PUT, body),
            (Method::DELETE, None),
        ] {
            let (status, json) = send(&app, method.clone(), &uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
            assert_eq!(json, json!({ "error": "Invalid user ID" }));
        }
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app();
    let uri = format!("/users/{}", MISSING_ID);
    let expected = json!({ "error": "User not found" });

    let (status, json) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, expected);

    let (status, json) = send(&app, Method::PUT, &uri, Some(r#"{"name": "x", "email": "y"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, expected);

    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, expected);
}

#[tokio::test]
async fn test_update_replaces_both_fields() {
    let app = app();
    let id = create(&app, "Ada", "ada@example.com").await;
    let uri = format!("/users/{}", id);

    let (status, json) = send(&app, Method::PUT, &uri, Some(r#"{"name": "A", "email": "b@x.com"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "User updated successfully" }));

    let (status, json) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "id": id, "name": "A", "email": "b@x.com" }));
}

#[tokio::test]
async fn test_update_with_missing_field_clears_it() {
    let app = app();
    let id = create(&app, "Ada", "ada@example.com").await;
    let uri = format!("/users/{}", id);

    let (status, _) = send(&app, Method::PUT, &uri, Some(r#"{"name": "Grace"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(json, json!({ "id": id, "name": "Grace", "email": "" }));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = app();
    let id = create(&app, "Ada", "ada@example.com").await;
    let uri = format!("/users/{}", id);

    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "User deleted successfully" }));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request_without_mutation() {
    let store = Arc::new(CountingStore::default());
    let app = app_with(store.clone());

    let (status, json) = send(&app, Method::POST, "/users", Some(r#"{"name": "Ada""#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!json["error"].as_str().unwrap().is_empty());

    let (status, json) = send(&app, Method::POST, "/users", Some(r#"{"name": 42}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(store.calls(), 0);

    let id = create(&app, "Ada", "ada@example.com").await;
    let calls_after_create = store.calls();

    let (status, json) = send(&app, Method::PUT, &format!("/users/{}", id), Some("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(store.calls(), calls_after_create);
    assert_eq!(store.stored(), 1);

    let (_, fetched) = send(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(fetched["name"], "Ada");
}

#[tokio::test]
async fn test_store_failures_are_internal_errors() {
    let app = app_with(Arc::new(FailingStore));
    let uri = format!("/users/{}", MISSING_ID);
    let body = Some(r#"{"name": "A", "email": "b@x.com"}"#);

    let cases = [
        (Method::POST, "/users".to_string(), body, "Failed to create user"),
        (Method::GET, uri.clone(), None, "Failed to get user"),
        (Method::PUT, uri.clone(), body, "Failed to update user"),
        (Method::DELETE, uri.clone(), None, "Failed to delete user"),
    ];

    for (method, uri, body, message) in cases {
        let (status, json) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_each_request_touches_store_once() {
    let store = Arc::new(CountingStore::default());
    let app = app_with(store.clone());

    let id = create(&app, "Ada", "ada@example.com").await;
    let uri = format!("/users/{}", id);
    send(&app, Method::GET, &uri, None).await;
    send(&app, Method::PUT, &uri, Some(r#"{"name": "A", "email": "b"}"#)).await;
    send(&app, Method::DELETE, &uri, None).await;

    assert_eq!(store.calls(), 4);
}

#[tokio::test]
async fn test_body_decoded_without_content_type() {
    let app = app();

    let (status, created) =
        send_untyped(&app, Method::POST, "/users", r#"{"name":"Ada","email":"a@x.com"}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Ada");

    let uri = format!("/users/{}", created["id"].as_str().unwrap());
    let (status, json) = send_untyped(&app, Method::PUT, &uri, r#"{"name":"A","email":"b@x.com"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "User updated successfully" }));

    let (status, json) = send_untyped(&app, Method::POST, "/users", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_oversized_body_gets_json_error() {
    let mut config = ServiceConfig::default();
    config.limits.max_body_bytes = 16;
    let store = Arc::new(CountingStore::default());
    let app = app_with_config(&config, store.clone());

    let body = json!({ "name": "Ada Lovelace", "email": "ada.lovelace@analytical-engine.example" })
        .to_string();
    assert!(body.len() > 16);

    let (status, json) = send(&app, Method::POST, "/users", Some(&body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json, json!({ "error": "Request body too large" }));

    let uri = format!("/users/{}", MISSING_ID);
    let (status, json) = send(&app, Method::PUT, &uri, Some(&body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json, json!({ "error": "Request body too large" }));

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_hung_store_fails_the_operation_at_deadline() {
    let mut config = ServiceConfig::default();
    config.timeouts.request_secs = 1;
    let app = app_with_config(&config, Arc::new(StallingStore));

    let (status, json) = send(&app, Method::GET, &format!("/users/{}", MISSING_ID), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Failed to get user" }));

    let (status, json) =
        send(&app, Method::POST, "/users", Some(r#"{"name": "A", "email": "b@x.com"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Failed to create user" }));
}
