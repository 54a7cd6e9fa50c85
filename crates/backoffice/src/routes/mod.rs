//! HTTP route handlers for the back-office JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Health check
//!
//! # Session
//! PUT    /session                   - Store the operator session token
//! DELETE /session                   - Clear the operator session token
//!
//! # Rooms
//! GET    /rooms                     - Room listing (?page=1)
//! POST   /rooms                     - Create room (validated form)
//! GET    /rooms/{id}                - Room detail
//! PUT    /rooms/{id}                - Update room (validated form)
//! DELETE /rooms/{id}                - Delete room
//! POST   /rooms/{id}/image          - Upload room image (multipart)
//! GET    /rooms/{id}/comments       - Paginated comments (?page=1)
//! POST   /rooms/{id}/comments       - Submit a comment
//!
//! # Locations
//! GET    /locations/{id}            - Location lookup (room form helper)
//!
//! # Users
//! GET    /users                     - User listing
//! POST   /users                     - Create user (validated form)
//! GET    /users/{id}                - User detail
//! PUT    /users/{id}                - Update user (validated form)
//! DELETE /users/{id}                - Delete user
//! POST   /users/avatar              - Upload avatar (multipart)
//!
//! # Bookings
//! GET    /bookings                  - Booking listing, newest first (?page=1)
//! POST   /bookings                  - Create booking (validated form)
//! POST   /bookings/quote            - Price quote for a draft booking
//! GET    /bookings/{id}             - Booking detail
//! PUT    /bookings/{id}             - Update booking (validated form)
//! DELETE /bookings/{id}             - Delete booking
//! ```

pub mod bookings;
pub mod comments;
pub mod rooms;
pub mod session;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the room routes router (comments nest under a room).
pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(rooms::index).post(rooms::create))
        .route(
            "/{id}",
            get(rooms::show).put(rooms::update).delete(rooms::destroy),
        )
        .route("/{id}/image", post(rooms::upload_image))
        .route(
            "/{id}/comments",
            get(comments::index).post(comments::create),
        )
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index).post(users::create))
        .route(
            "/{id}",
            get(users::show).put(users::update).delete(users::destroy),
        )
        .route("/avatar", post(users::upload_avatar))
}

/// Create the booking routes router.
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::index).post(bookings::create))
        .route("/quote", post(bookings::quote))
        .route(
            "/{id}",
            get(bookings::show)
                .put(bookings::update)
                .delete(bookings::destroy),
        )
}

/// Create all routes for the back-office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/session", put(session::store).delete(session::clear))
        .nest("/rooms", room_routes())
        .route("/locations/{id}", get(rooms::show_location))
        .nest("/users", user_routes())
        .nest("/bookings", booking_routes())
}
