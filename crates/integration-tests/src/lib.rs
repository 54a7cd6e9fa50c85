//! Integration test harness for Staybook.
//!
//! Spins up an in-process mock of the Stay API (envelope responses, wire
//! field names, remote id assignment) on an ephemeral port, so the client,
//! coordinators, and HTTP routes can be exercised end to end without the
//! real platform.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mock = MockStay::new().spawn().await;
//! let client = mock.client(300);
//! let room = mock.seed_room("Loft", 50);
//! assert_eq!(client.get_room(room.id).await.unwrap().fields.name, "Loft");
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};
use staybook_backoffice::config::{BackofficeConfig, StayApiConfig};
use staybook_backoffice::state::AppState;
use staybook_backoffice::stay::{
    Booking, BookingFields, Comment, Location, Room, RoomFields, StayClient, User, UserDraft,
};
use staybook_core::{BookingId, CommentId, LocationId, Role, RoomId, UserId};

/// Per-endpoint request counters, for asserting cache behavior.
#[derive(Default)]
pub struct Hits {
    pub room_lists: AtomicUsize,
    pub room_shows: AtomicUsize,
    pub user_lists: AtomicUsize,
    pub booking_lists: AtomicUsize,
    pub comment_lists: AtomicUsize,
    pub location_shows: AtomicUsize,
    pub creates: AtomicUsize,
}

#[derive(Default)]
struct MockStayState {
    rooms: Mutex<HashMap<i64, Room>>,
    users: Mutex<HashMap<i64, User>>,
    bookings: Mutex<HashMap<i64, Booking>>,
    comments: Mutex<HashMap<i64, Comment>>,
    locations: Mutex<HashMap<i64, Location>>,
    next_id: AtomicI64,
    hits: Hits,
    /// Token the avatar endpoint accepts; anything else gets a 401.
    valid_session: Mutex<Option<String>>,
}

impl MockStayState {
    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

/// Builder for the mock Stay API.
#[derive(Default)]
pub struct MockStay {
    state: Arc<MockStayState>,
}

/// A running mock Stay API plus seeding and inspection helpers.
pub struct MockStayServer {
    state: Arc<MockStayState>,
    /// Base URL including the `/api` prefix, as the real platform uses.
    pub base_url: String,
}

impl MockStay {
    #[must_use]
    pub fn new() -> Self {
        let state = Arc::new(MockStayState::default());
        state.next_id.store(1, Ordering::SeqCst);
        Self { state }
    }

    /// Bind an ephemeral port and serve the mock in a background task.
    pub async fn spawn(self) -> MockStayServer {
        let app = router(Arc::clone(&self.state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock listener");
        let addr: SocketAddr = listener.local_addr().expect("No local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server error");
        });

        MockStayServer {
            state: self.state,
            base_url: format!("http://{addr}/api"),
        }
    }
}

impl MockStayServer {
    /// Stay API configuration pointing at the mock.
    #[must_use]
    pub fn stay_config(&self, cache_ttl_secs: u64) -> StayApiConfig {
        StayApiConfig {
            base_url: self.base_url.clone(),
            api_key: SecretString::from("kZ83!vQn@4xT9#mWb2"),
            timeout_secs: 5,
            cache_ttl_secs,
        }
    }

    /// A Stay client pointed at the mock.
    #[must_use]
    pub fn client(&self, cache_ttl_secs: u64) -> StayClient {
        StayClient::new(&self.stay_config(cache_ttl_secs))
    }

    /// Application state for serving the back-office router over the mock.
    #[must_use]
    pub fn backoffice_state(&self, cache_ttl_secs: u64) -> AppState {
        AppState::new(BackofficeConfig {
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            stay: self.stay_config(cache_ttl_secs),
            sentry_dsn: None,
            sentry_environment: None,
        })
    }

    /// Serve the back-office router in a background task; returns its base URL.
    pub async fn spawn_backoffice(&self, cache_ttl_secs: u64) -> String {
        let app = staybook_backoffice::app(self.backoffice_state(cache_ttl_secs));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind back-office listener");
        let addr = listener.local_addr().expect("No local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Back-office server error");
        });

        format!("http://{addr}")
    }

    /// Request counters.
    #[must_use]
    pub fn hits(&self) -> &Hits {
        &self.state.hits
    }

    /// Configure the session token the avatar endpoint accepts.
    pub fn set_valid_session(&self, token: &str) {
        *lock(&self.state.valid_session) = Some(token.to_string());
    }

    pub fn seed_room(&self, name: &str, price: i64) -> Room {
        let id = self.state.assign_id();
        let room = Room {
            id: RoomId::new(id),
            fields: RoomFields {
                name: name.to_string(),
                guests: 2,
                bedrooms: 1,
                beds: 1,
                bathrooms: 1,
                price,
                description: format!("{name} description"),
                image_url: "https://img.mock/room.jpg".to_string(),
                washer: false,
                iron: false,
                tv: true,
                air_conditioning: true,
                wifi: true,
                kitchen: false,
                parking: false,
                pool: false,
                ironing_board: false,
                location_id: LocationId::new(1),
            },
        };
        lock(&self.state.rooms).insert(id, room.clone());
        room
    }

    pub fn seed_user(&self, name: &str, email: &str) -> User {
        let id = self.state.assign_id();
        let user = User {
            id: UserId::new(id),
            name: name.to_string(),
            email: email.to_string(),
            password: None,
            phone: None,
            birthday: None,
            avatar: None,
            gender: true,
            role: Role::User,
        };
        lock(&self.state.users).insert(id, user.clone());
        user
    }

    pub fn seed_booking(
        &self,
        room_id: RoomId,
        user_id: UserId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Booking {
        let id = self.state.assign_id();
        let booking = Booking {
            id: BookingId::new(id),
            fields: BookingFields {
                room_id,
                user_id,
                check_in,
                check_out,
                guests: 2,
            },
        };
        lock(&self.state.bookings).insert(id, booking.clone());
        booking
    }

    pub fn seed_location(&self, name: &str) -> Location {
        let id = self.state.assign_id();
        let location = Location {
            id: LocationId::new(id),
            name: name.to_string(),
            province: "Khanh Hoa".to_string(),
            country: "Vietnam".to_string(),
            image_url: None,
        };
        lock(&self.state.locations).insert(id, location.clone());
        location
    }

    pub fn seed_comment(&self, room_id: RoomId, commenter_id: UserId, content: &str) -> Comment {
        let id = self.state.assign_id();
        let comment = Comment {
            id: CommentId::new(id),
            room_id,
            commenter_id,
            date: "2026-05-01T10:00:00".to_string(),
            content: content.to_string(),
            rating: 4,
        };
        lock(&self.state.comments).insert(id, comment.clone());
        comment
    }
}

// =============================================================================
// Mock routes
// =============================================================================

fn router(state: Arc<MockStayState>) -> Router {
    let api = Router::new()
        .route("/phong-thue", get(list_rooms).post(create_room))
        .route(
            "/phong-thue/{id}",
            get(show_room).put(update_room).delete(delete_room),
        )
        .route("/phong-thue/upload-hinh-phong", post(upload_room_image))
        .route("/users", get(list_users).post(create_user).delete(delete_user))
        .route("/users/{id}", get(show_user).put(update_user))
        .route("/users/upload-avatar", post(upload_avatar))
        .route("/dat-phong", get(list_bookings).post(create_booking))
        .route(
            "/dat-phong/{id}",
            get(show_booking).put(update_booking).delete(delete_booking),
        )
        .route("/binh-luan", post(create_comment))
        .route("/binh-luan/lay-binh-luan-theo-phong/{id}", get(list_comments))
        .route("/vi-tri/{id}", get(show_location))
        .with_state(state);

    Router::new().nest("/api", api)
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn envelope<T: serde::Serialize>(content: T) -> Json<Value> {
    Json(json!({
        "statusCode": 200,
        "content": content,
        "dateTime": Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
    }))
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "statusCode": 404,
            "message": format!("{what} not found"),
            "dateTime": Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        })),
    )
        .into_response()
}

#[derive(Deserialize)]
struct RoomPageQuery {
    #[serde(rename = "pageIndex")]
    page_index: Option<usize>,
    #[serde(rename = "pageSize")]
    page_size: Option<usize>,
}

async fn list_rooms(
    State(state): State<Arc<MockStayState>>,
    Query(query): Query<RoomPageQuery>,
) -> Json<Value> {
    state.hits.room_lists.fetch_add(1, Ordering::SeqCst);
    let rooms = sorted_page(
        &lock(&state.rooms),
        query.page_index.unwrap_or(1),
        query.page_size.unwrap_or(50),
    );
    envelope(rooms)
}

async fn show_room(State(state): State<Arc<MockStayState>>, Path(id): Path<i64>) -> Response {
    state.hits.room_shows.fetch_add(1, Ordering::SeqCst);
    lock(&state.rooms).get(&id).map_or_else(
        || not_found("Room"),
        |room| envelope(room).into_response(),
    )
}

async fn create_room(
    State(state): State<Arc<MockStayState>>,
    Json(fields): Json<RoomFields>,
) -> Json<Value> {
    state.hits.creates.fetch_add(1, Ordering::SeqCst);
    let id = state.assign_id();
    let room = Room {
        id: RoomId::new(id),
        fields,
    };
    lock(&state.rooms).insert(id, room.clone());
    envelope(room)
}

async fn update_room(
    State(state): State<Arc<MockStayState>>,
    Path(id): Path<i64>,
    Json(room): Json<Room>,
) -> Response {
    let mut rooms = lock(&state.rooms);
    if !rooms.contains_key(&id) {
        return not_found("Room");
    }
    let updated = Room {
        id: RoomId::new(id),
        fields: room.fields,
    };
    rooms.insert(id, updated.clone());
    envelope(updated).into_response()
}

async fn delete_room(State(state): State<Arc<MockStayState>>, Path(id): Path<i64>) -> Response {
    if lock(&state.rooms).remove(&id).is_none() {
        return not_found("Room");
    }
    envelope(Value::Null).into_response()
}

#[derive(Deserialize)]
struct RoomImageQuery {
    #[serde(rename = "maPhong")]
    room_id: i64,
}

async fn upload_room_image(
    State(state): State<Arc<MockStayState>>,
    Query(query): Query<RoomImageQuery>,
    mut multipart: Multipart,
) -> Response {
    let Some((file_name, _)) = read_upload(&mut multipart).await else {
        return not_found("File");
    };
    let mut rooms = lock(&state.rooms);
    let Some(room) = rooms.get_mut(&query.room_id) else {
        return not_found("Room");
    };
    room.fields.image_url = format!("https://img.mock/{file_name}");
    envelope(room.clone()).into_response()
}

async fn list_users(State(state): State<Arc<MockStayState>>) -> Json<Value> {
    state.hits.user_lists.fetch_add(1, Ordering::SeqCst);
    let mut users: Vec<User> = lock(&state.users).values().cloned().collect();
    users.sort_by_key(|u| u.id);
    envelope(users)
}

async fn show_user(State(state): State<Arc<MockStayState>>, Path(id): Path<i64>) -> Response {
    lock(&state.users).get(&id).map_or_else(
        || not_found("User"),
        |user| envelope(user).into_response(),
    )
}

async fn create_user(
    State(state): State<Arc<MockStayState>>,
    Json(draft): Json<UserDraft>,
) -> Json<Value> {
    state.hits.creates.fetch_add(1, Ordering::SeqCst);
    let id = state.assign_id();
    let user = User {
        id: UserId::new(id),
        name: draft.name,
        email: draft.email,
        password: None,
        phone: draft.phone,
        birthday: draft.birthday,
        avatar: draft.avatar,
        gender: draft.gender,
        role: draft.role,
    };
    lock(&state.users).insert(id, user.clone());
    envelope(user)
}

async fn update_user(
    State(state): State<Arc<MockStayState>>,
    Path(id): Path<i64>,
    Json(user): Json<User>,
) -> Response {
    let mut users = lock(&state.users);
    if !users.contains_key(&id) {
        return not_found("User");
    }
    let updated = User {
        id: UserId::new(id),
        password: None,
        ..user
    };
    users.insert(id, updated.clone());
    envelope(updated).into_response()
}

#[derive(Deserialize)]
struct UserDeleteQuery {
    id: i64,
}

async fn delete_user(
    State(state): State<Arc<MockStayState>>,
    Query(query): Query<UserDeleteQuery>,
) -> Response {
    if lock(&state.users).remove(&query.id).is_none() {
        return not_found("User");
    }
    envelope(Value::Null).into_response()
}

async fn upload_avatar(
    State(state): State<Arc<MockStayState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let expected = lock(&state.valid_session).clone();
    let presented = headers.get("token").and_then(|v| v.to_str().ok());
    if expected.as_deref() != presented {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "statusCode": 401,
                "message": "Token expired",
            })),
        )
            .into_response();
    }

    let Some((file_name, _)) = read_upload(&mut multipart).await else {
        return not_found("File");
    };
    let mut users = lock(&state.users);
    // The real platform resolves the account from the token; the mock just
    // updates the lowest-id user.
    let Some(id) = users.keys().min().copied() else {
        return not_found("User");
    };
    let Some(user) = users.get_mut(&id) else {
        return not_found("User");
    };
    user.avatar = Some(format!("https://img.mock/{file_name}"));
    envelope(user.clone()).into_response()
}

#[derive(Deserialize)]
struct BookingPageQuery {
    page: Option<usize>,
    limit: Option<usize>,
}

async fn list_bookings(
    State(state): State<Arc<MockStayState>>,
    Query(query): Query<BookingPageQuery>,
) -> Json<Value> {
    state.hits.booking_lists.fetch_add(1, Ordering::SeqCst);
    let bookings = sorted_page(
        &lock(&state.bookings),
        query.page.unwrap_or(1),
        query.limit.unwrap_or(20),
    );
    envelope(bookings)
}

async fn show_booking(State(state): State<Arc<MockStayState>>, Path(id): Path<i64>) -> Response {
    lock(&state.bookings).get(&id).map_or_else(
        || not_found("Booking"),
        |booking| envelope(booking).into_response(),
    )
}

async fn create_booking(
    State(state): State<Arc<MockStayState>>,
    Json(fields): Json<BookingFields>,
) -> Json<Value> {
    state.hits.creates.fetch_add(1, Ordering::SeqCst);
    let id = state.assign_id();
    let booking = Booking {
        id: BookingId::new(id),
        fields,
    };
    lock(&state.bookings).insert(id, booking.clone());
    envelope(booking)
}

async fn update_booking(
    State(state): State<Arc<MockStayState>>,
    Path(id): Path<i64>,
    Json(booking): Json<Booking>,
) -> Response {
    let mut bookings = lock(&state.bookings);
    if !bookings.contains_key(&id) {
        return not_found("Booking");
    }
    let updated = Booking {
        id: BookingId::new(id),
        fields: booking.fields,
    };
    bookings.insert(id, updated.clone());
    envelope(updated).into_response()
}

async fn delete_booking(State(state): State<Arc<MockStayState>>, Path(id): Path<i64>) -> Response {
    if lock(&state.bookings).remove(&id).is_none() {
        return not_found("Booking");
    }
    envelope(Value::Null).into_response()
}

async fn list_comments(
    State(state): State<Arc<MockStayState>>,
    Path(room_id): Path<i64>,
) -> Json<Value> {
    state.hits.comment_lists.fetch_add(1, Ordering::SeqCst);
    let mut comments: Vec<Comment> = lock(&state.comments)
        .values()
        .filter(|c| c.room_id.as_i64() == room_id)
        .cloned()
        .collect();
    comments.sort_by_key(|c| c.id);
    envelope(comments)
}

async fn create_comment(
    State(state): State<Arc<MockStayState>>,
    Json(draft): Json<Value>,
) -> Json<Value> {
    state.hits.creates.fetch_add(1, Ordering::SeqCst);
    let id = state.assign_id();
    let mut stored = draft;
    stored["id"] = json!(id);
    let comment: Comment =
        serde_json::from_value(stored.clone()).expect("Comment draft has wire shape");
    lock(&state.comments).insert(id, comment);
    envelope(stored)
}

async fn show_location(State(state): State<Arc<MockStayState>>, Path(id): Path<i64>) -> Response {
    state.hits.location_shows.fetch_add(1, Ordering::SeqCst);
    lock(&state.locations).get(&id).map_or_else(
        || not_found("Location"),
        |location| envelope(location).into_response(),
    )
}

async fn read_upload(multipart: &mut Multipart) -> Option<(String, Vec<u8>)> {
    while let Some(field) = multipart.next_field().await.ok()? {
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.ok()?;
        return Some((file_name, bytes.to_vec()));
    }
    None
}

/// Sort by id and slice one 1-based page.
fn sorted_page<T: Clone>(items: &HashMap<i64, T>, page: usize, size: usize) -> Vec<T> {
    let mut all: Vec<(i64, T)> = items.iter().map(|(id, v)| (*id, v.clone())).collect();
    all.sort_by_key(|(id, _)| *id);
    let start = (page.max(1) - 1) * size;
    all.into_iter().map(|(_, v)| v).skip(start).take(size).collect()
}
