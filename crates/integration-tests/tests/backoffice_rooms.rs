//! Integration tests for the back-office HTTP surface: room CRUD,
//! validation responses, and per-room comment pagination.

use reqwest::StatusCode;
use serde_json::{Value, json};
use staybook_core::{LocationId, RoomId, UserId};
use staybook_integration_tests::MockStay;

#[tokio::test]
async fn test_health_endpoint() {
    let mock = MockStay::new().spawn().await;
    let base = mock.spawn_backoffice(300).await;

    let resp = reqwest::get(format!("{base}/health")).await.expect("get");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn test_create_room_rejects_invalid_form_with_field_errors() {
    let mock = MockStay::new().spawn().await;
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    // Name and description missing, location unfilled.
    let resp = http
        .post(format!("{base}/rooms"))
        .json(&json!({ "price": 10, "image_url": "https://img.mock/x.jpg" }))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = resp.json().await.expect("json");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"tenPhong"));
    assert!(fields.contains(&"moTa"));
    assert!(fields.contains(&"maViTri"));
}

#[tokio::test]
async fn test_create_room_resolves_location_and_persists() {
    let mock = MockStay::new().spawn().await;
    let location = mock.seed_location("Nha Trang");
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let resp = http
        .post(format!("{base}/rooms"))
        .json(&json!({
            "name": "Garden loft",
            "guests": 2,
            "bedrooms": 1,
            "beds": 1,
            "bathrooms": 1,
            "price": 70,
            "description": "Quiet and green",
            "image_url": "https://img.mock/loft.jpg",
            "wifi": true,
            "location_id": location.id.as_i64(),
        }))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = resp.json().await.expect("json");
    let id = created["id"].as_i64().expect("assigned id");
    assert!(id >= 1);
    // Response carries the platform wire names.
    assert_eq!(created["tenPhong"], "Garden loft");
    assert_eq!(created["giaTien"], 70);

    let listed: Value = http
        .get(format!("{base}/rooms"))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(listed.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn test_create_room_with_dangling_location_gets_field_error() {
    let mock = MockStay::new().spawn().await;
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let resp = http
        .post(format!("{base}/rooms"))
        .json(&json!({
            "name": "Garden loft",
            "price": 70,
            "description": "Quiet and green",
            "image_url": "https://img.mock/loft.jpg",
            "location_id": 424242,
        }))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = resp.json().await.expect("json");
    let errors = body["errors"].as_array().expect("errors array");
    assert!(errors.iter().any(|e| {
        e["field"] == "maViTri" && e["message"] == "Location ID does not exist or is invalid."
    }));
}

#[tokio::test]
async fn test_delete_room_returns_no_content_then_404() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 50);
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let resp = http
        .delete(format!("{base}/rooms/{}", room.id))
        .send()
        .await
        .expect("delete");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = http
        .get(format!("{base}/rooms/{}", room.id))
        .send()
        .await
        .expect("get");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_location_lookup_route() {
    let mock = MockStay::new().spawn().await;
    let location = mock.seed_location("Nha Trang");
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let body: Value = http
        .get(format!("{base}/locations/{}", location.id))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(body["tenViTri"], "Nha Trang");

    let resp = http
        .get(format!("{base}/locations/424242"))
        .send()
        .await
        .expect("get");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_room_comments_are_paginated_with_strip() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 50);
    let user = mock.seed_user("Mai", "mai@example.com");
    for i in 0..12 {
        mock.seed_comment(room.id, user.id, &format!("comment {i}"));
    }
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let page2: Value = http
        .get(format!("{base}/rooms/{}/comments?page=2", room.id))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");

    assert_eq!(page2["page"], 2);
    assert_eq!(page2["total_pages"], 2);
    assert_eq!(page2["comments"].as_array().expect("array").len(), 2);
    let strip = page2["strip"].as_array().expect("strip");
    assert_eq!(strip.len(), 2);
    assert_eq!(strip[0]["kind"], "page");
}

#[tokio::test]
async fn test_past_the_end_comment_page_clamps_to_last() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 50);
    let user = mock.seed_user("Mai", "mai@example.com");
    for i in 0..12 {
        mock.seed_comment(room.id, user.id, &format!("comment {i}"));
    }
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let page: Value = http
        .get(format!("{base}/rooms/{}/comments?page=9", room.id))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");

    // The last page is served, with its comments, not an empty slice.
    assert_eq!(page["page"], 2);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["comments"].as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn test_submit_comment_through_room_route() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 50);
    let user = mock.seed_user("Mai", "mai@example.com");
    let base = mock.spawn_backoffice(300).await;
    let http = reqwest::Client::new();

    let resp = http
        .post(format!("{base}/rooms/{}/comments", room.id))
        .json(&json!({
            "room_id": RoomId::new(0),
            "commenter_id": user.id,
            "content": "Great stay",
            "rating": 5,
        }))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = resp.json().await.expect("json");
    assert_eq!(created["noiDung"], "Great stay");
    assert_eq!(created["maPhong"], room.id.as_i64());

    // Rating out of range is a validation failure.
    let resp = http
        .post(format!("{base}/rooms/{}/comments", room.id))
        .json(&json!({
            "room_id": RoomId::new(0),
            "commenter_id": UserId::new(user.id.as_i64()),
            "content": "Too many stars",
            "rating": 6,
        }))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_room_detail_uses_wire_names_end_to_end() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 50);
    let base = mock.spawn_backoffice(300).await;

    let body: Value = reqwest::get(format!("{base}/rooms/{}", room.id))
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(body["id"].as_i64(), Some(room.id.as_i64()));
    assert_eq!(body["maViTri"].as_i64(), Some(LocationId::new(1).as_i64()));
}
