//! Handler tests for the Users domain
//!
//! Drive the users router directly with `oneshot`, backed by the in-memory
//! repository. They cover status codes, body shapes and error mapping, not
//! the application's middleware stack.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

fn alice() -> Value {
    json!({ "username": "alice", "email": "a@x.com", "password": "secret1" })
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = app();

    let (status, created) = send(&app, "POST", "/", Some(alice())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "CUSTOMER");
    assert_eq!(created["active"], true);
    assert!(created.get("password").is_none());
    let id = created["id"].as_i64().unwrap();

    let duplicate = json!({ "username": "alice", "email": "other@x.com", "password": "secret1" });
    let (status, body) = send(&app, "POST", "/", Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Conflict", "message": "Username already exists: alice" }));

    let (status, fetched) = send(&app, "GET", &format!("/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["username"], "alice");
    assert_eq!(fetched["email"], "a@x.com");
    assert_eq!(fetched["createdAt"], created["createdAt"]);

    let (status, activated) = send(&app, "PATCH", &format!("/{}/activate", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(activated["active"], true);

    let (status, deactivated) = send(&app, "DELETE", &format!("/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deactivated["active"], false);

    let (status, updated) = send(&app, "PUT", &format!("/{}", id), Some(json!({ "role": "ADMIN" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role"], "ADMIN");
    assert_eq!(updated["username"], "alice");
    assert_eq!(updated["email"], "a@x.com");
    assert_eq!(updated["active"], false);
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let (status, body) = send(&app(), "POST", "/", Some(json!({ "username": "al", "email": "nope" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "username": "Username must be at least 3 characters",
            "email": "Email should be valid",
            "password": "Password must be at least 6 characters"
        })
    );
}

#[tokio::test]
async fn test_create_with_null_field_reports_field_error() {
    let input = json!({ "username": null, "email": "a@x.com", "password": "secret1" });
    let (status, body) = send(&app(), "POST", "/", Some(input)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "username": "Username must be at least 3 characters" }));
}

#[tokio::test]
async fn test_create_with_explicit_role() {
    let mut input = alice();
    input["role"] = json!("COURIER");
    input["phone"] = json!("+48 600 000 000");

    let (status, body) = send(&app(), "POST", "/", Some(input)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "COURIER");
    assert_eq!(body["phone"], "+48 600 000 000");
}

#[tokio::test]
async fn test_create_with_unknown_role_is_bad_request() {
    let mut input = alice();
    input["role"] = json!("PILOT");

    let (status, body) = send(&app(), "POST", "/", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = app();
    send(&app, "POST", "/", Some(alice())).await;

    let input = json!({ "username": "bob", "email": "a@x.com", "password": "secret1" });
    let (status, body) = send(&app, "POST", "/", Some(input)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists: a@x.com");
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let app = app();

    for (method, uri) in [("GET", "/42"), ("DELETE", "/42"), ("PATCH", "/42/activate")] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body, json!({ "error": "Not Found", "message": "User not found with id: 42" }));
    }

    let (status, _) = send(&app, "PUT", "/42", Some(json!({ "phone": "123" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (status, body) = send(&app(), "GET", "/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Bad Request", "message": "Invalid id: abc" }));
}

#[tokio::test]
async fn test_list_filters_by_role() {
    let app = app();
    send(&app, "POST", "/", Some(alice())).await;
    send(
        &app,
        "POST",
        "/",
        Some(json!({ "username": "root", "email": "r@x.com", "password": "secret1", "role": "ADMIN" })),
    )
    .await;
    send(
        &app,
        "POST",
        "/",
        Some(json!({ "username": "boss", "email": "b@x.com", "password": "secret1", "role": "ADMIN" })),
    )
    .await;

    let (status, all) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, admins) = send(&app, "GET", "/?role=ADMIN", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = admins
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["root", "boss"]);

    let (status, couriers) = send(&app, "GET", "/?role=COURIER", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(couriers, json!([]));
}

#[tokio::test]
async fn test_list_with_empty_role_lists_everyone() {
    let app = app();
    send(&app, "POST", "/", Some(alice())).await;
    send(
        &app,
        "POST",
        "/",
        Some(json!({ "username": "root", "email": "r@x.com", "password": "secret1", "role": "ADMIN" })),
    )
    .await;

    let (status, users) = send(&app, "GET", "/?role=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_with_unknown_role_is_bad_request() {
    let (status, body) = send(&app(), "GET", "/?role=PILOT", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_update_rejects_taken_username() {
    let app = app();
    send(&app, "POST", "/", Some(alice())).await;
    let (_, bob) = send(
        &app,
        "POST",
        "/",
        Some(json!({ "username": "bob", "email": "b@x.com", "password": "secret1" })),
    )
    .await;

    let uri = format!("/{}", bob["id"]);
    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "username": "alice" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username already exists: alice");

    // Same value as current is not a collision
    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "username": "bob" }))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_validates_present_fields() {
    let app = app();
    let (_, created) = send(&app, "POST", "/", Some(alice())).await;

    let uri = format!("/{}", created["id"]);
    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "email": "broken" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "email": "Email should be valid" }));
}
