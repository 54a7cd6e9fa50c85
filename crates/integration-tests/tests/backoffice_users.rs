//! Integration tests for user account routes and operator session handling.

use reqwest::StatusCode;
use serde_json::{Value, json};
use staybook_integration_tests::MockStay;

#[tokio::test]
async fn test_create_user_validates_email_and_password() {
    let mock = MockStay::new().spawn().await;
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let resp = http
        .post(format!("{base}/users"))
        .json(&json!({
            "name": "Mai Tran",
            "email": "not-an-email",
            "password": "short",
        }))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = resp.json().await.expect("json");
    let errors = body["errors"].as_array().expect("errors array");
    assert!(errors.iter().any(|e| e["field"] == "email"));
    assert!(
        errors
            .iter()
            .any(|e| e["message"] == "Password must be at least 6 characters")
    );
}

#[tokio::test]
async fn test_create_and_update_user_roundtrip() {
    let mock = MockStay::new().spawn().await;
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let created: Value = http
        .post(format!("{base}/users"))
        .json(&json!({
            "name": "Mai Tran",
            "email": "mai@example.com",
            "password": "hunter22",
            "gender": true,
            "role": "ADMIN",
        }))
        .send()
        .await
        .expect("post")
        .json()
        .await
        .expect("json");
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["role"], "ADMIN");
    // Passwords are never echoed back.
    assert!(created.get("password").is_none_or(Value::is_null));

    let updated: Value = http
        .put(format!("{base}/users/{id}"))
        .json(&json!({
            "name": "Mai T. Tran",
            "email": "mai@example.com",
            "gender": true,
            "role": "ADMIN",
        }))
        .send()
        .await
        .expect("put")
        .json()
        .await
        .expect("json");
    assert_eq!(updated["name"], "Mai T. Tran");
    assert_eq!(updated["id"].as_i64(), Some(id));
}

#[tokio::test]
async fn test_session_store_and_clear_routes() {
    let mock = MockStay::new().spawn().await;
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let resp = http
        .put(format!("{base}/session"))
        .json(&json!({ "token": "" }))
        .send()
        .await
        .expect("put");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = http
        .put(format!("{base}/session"))
        .json(&json!({ "token": "operator-session-token" }))
        .send()
        .await
        .expect("put");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = http
        .delete(format!("{base}/session"))
        .send()
        .await
        .expect("delete");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_user_route() {
    let mock = MockStay::new().spawn().await;
    let user = mock.seed_user("Mai", "mai@example.com");
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let resp = http
        .delete(format!("{base}/users/{}", user.id))
        .send()
        .await
        .expect("delete");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let listed: Value = http
        .get(format!("{base}/users"))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert!(listed.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let mock = MockStay::new().spawn().await;
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let resp = http
        .get(format!("{base}/users/9999"))
        .send()
        .await
        .expect("get");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("json");
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .starts_with("Not found")
    );
}

#[tokio::test]
async fn test_expired_session_upload_returns_401() {
    let mock = MockStay::new().spawn().await;
    mock.set_valid_session("good-token");
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    // No operator session was stored, so the platform rejects the upload.
    let part = reqwest::multipart::Part::bytes(vec![0xFF, 0xD8]).file_name("me.jpg");
    let form = reqwest::multipart::Form::new().part("formFile", part);
    let resp = http
        .post(format!("{base}/users/avatar"))
        .multipart(form)
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["message"], "Session expired. Please sign in again.");
}
