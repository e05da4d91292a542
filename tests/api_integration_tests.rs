//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{DateTime, TimeDelta, Utc};
use mini_kv::{api::create_router, AppState, KvStore, OverwritePolicy};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn test_state(policy: OverwritePolicy) -> AppState {
    AppState::new(KvStore::new(DAY, policy))
}

fn create_test_app() -> Router {
    create_router(test_state(OverwritePolicy::Refresh))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn body_to_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn timestamp(json: &Value, field: &str) -> DateTime<Utc> {
    json[field].as_str().unwrap().parse().unwrap()
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_via_query_params() {
    let app = create_test_app();

    let response = send(&app, "GET", "/set?key=color&value=blue", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response).await, "Key color set to value blue\n");
}

#[tokio::test]
async fn test_set_via_json_body() {
    let app = create_test_app();

    let response = send(&app, "POST", "/set", Some(r#"{"key":"k","value":"v"}"#)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response).await, "ok\n");
}

#[tokio::test]
async fn test_set_missing_value_query() {
    let app = create_test_app();

    let response = send(&app, "GET", "/set?key=only", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["error"], "Key or value not provided");
}

#[tokio::test]
async fn test_set_missing_key_body() {
    let app = create_test_app();

    let response = send(&app, "POST", "/set", Some(r#"{"value":"v"}"#)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_empty_value_body() {
    let app = create_test_app();

    let response = send(&app, "POST", "/set", Some(r#"{"key":"k","value":""}"#)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["error"], "Key or value not provided");

    let response = send(&app, "GET", "/get?key=k", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_undecodable_body() {
    let app = create_test_app();

    let response = send(&app, "POST", "/set", Some(r#"{"invalid json"#)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to decode JSON data"));
}

#[tokio::test]
async fn test_set_method_not_allowed() {
    let app = create_test_app();

    let response = send(&app, "DELETE", "/set?key=k&value=v", None).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_json_value_returned_as_object() {
    let app = create_test_app();

    let body = serde_json::json!({"key": "hello", "value": "{\"hello\":\"world\"}"}).to_string();
    let set = send(&app, "POST", "/set", Some(&body)).await;
    assert_eq!(set.status(), StatusCode::OK);

    let response = send(&app, "GET", "/get?key=hello", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let json = body_to_json(response).await;
    assert_eq!(json["key"], "hello");
    assert_eq!(json["value"], serde_json::json!({"hello": "world"}));
    assert_eq!(timestamp(&json, "createdAt"), timestamp(&json, "updatedAt"));
}

#[tokio::test]
async fn test_get_object_body_value_roundtrips() {
    let app = create_test_app();

    let set = send(
        &app,
        "POST",
        "/set",
        Some(r#"{"key":"nested","value":{"a":[1,2,{"b":null}]}}"#),
    )
    .await;
    assert_eq!(set.status(), StatusCode::OK);

    let json = body_to_json(send(&app, "GET", "/get?key=nested", None).await).await;
    assert_eq!(json["value"], serde_json::json!({"a": [1, 2, {"b": null}]}));
}

#[tokio::test]
async fn test_get_plain_value_returned_as_string() {
    let app = create_test_app();

    send(&app, "GET", "/set?key=greeting&value=hi%20there", None).await;

    let json = body_to_json(send(&app, "GET", "/get?key=greeting", None).await).await;
    assert_eq!(json["value"], "hi there");
}

#[tokio::test]
async fn test_get_not_found() {
    let app = create_test_app();

    let response = send(&app, "GET", "/get?key=nonexistent_key", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_to_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_get_missing_key_param() {
    let app = create_test_app();

    let response = send(&app, "GET", "/get", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["error"], "Key not provided");
}

#[tokio::test]
async fn test_get_repeated_key_param_uses_first() {
    let app = create_test_app();

    send(&app, "GET", "/set?key=a&value=first", None).await;

    let response = send(&app, "GET", "/get?key=a&key=b", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["key"], "a");
    assert_eq!(json["value"], "first");

    let response = send(&app, "GET", "/get?key=b&key=a", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response).await;
    assert_eq!(json["error"], "Key not found: b");
}

#[tokio::test]
async fn test_set_repeated_params_use_first() {
    let app = create_test_app();

    let response = send(&app, "GET", "/set?key=k&value=one&value=two", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response).await, "Key k set to value one\n");
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_success() {
    let app = create_test_app();

    send(&app, "GET", "/set?key=delete_key&value=v", None).await;

    let response = send(&app, "DELETE", "/delete?key=delete_key", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(response).await,
        serde_json::json!({"key": "delete_key"})
    );

    let response = send(&app, "GET", "/get?key=delete_key", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_not_found() {
    let app = create_test_app();

    let response = send(&app, "DELETE", "/delete?key=nonexistent_key", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_key_param() {
    let app = create_test_app();

    let response = send(&app, "DELETE", "/delete", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_to_json(response).await.get("error").is_some());
}

// == Overwrite Policy Tests ==

#[tokio::test]
async fn test_overwrite_refresh_moves_created_at() {
    let state = test_state(OverwritePolicy::Refresh);
    let app = create_router(state.clone());
    let earlier = Utc::now() - TimeDelta::hours(1);
    state.store.set_at("k", "v1", earlier).await;

    send(&app, "GET", "/set?key=k&value=v2", None).await;

    let json = body_to_json(send(&app, "GET", "/get?key=k", None).await).await;
    assert_eq!(json["value"], "v2");
    assert!(timestamp(&json, "createdAt") > earlier);
    assert_eq!(timestamp(&json, "createdAt"), timestamp(&json, "updatedAt"));
}

#[tokio::test]
async fn test_overwrite_preserve_keeps_created_at() {
    let state = test_state(OverwritePolicy::Preserve);
    let app = create_router(state.clone());
    let earlier = Utc::now() - TimeDelta::hours(1);
    state.store.set_at("k", "v1", earlier).await;

    send(&app, "GET", "/set?key=k&value=v2", None).await;

    let json = body_to_json(send(&app, "GET", "/get?key=k", None).await).await;
    assert_eq!(json["value"], "v2");
    assert_eq!(timestamp(&json, "createdAt"), earlier);
    assert!(timestamp(&json, "updatedAt") > earlier);
}

// == Sweep via API Tests ==

#[tokio::test]
async fn test_swept_record_not_found() {
    let state = test_state(OverwritePolicy::Refresh);
    let app = create_router(state.clone());
    state
        .store
        .set_at("old", "v", Utc::now() - TimeDelta::hours(25))
        .await;

    assert_eq!(send(&app, "GET", "/get?key=old", None).await.status(), StatusCode::OK);

    assert_eq!(state.store.sweep().await, 1);

    assert_eq!(
        send(&app, "GET", "/get?key=old", None).await.status(),
        StatusCode::NOT_FOUND
    );
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
