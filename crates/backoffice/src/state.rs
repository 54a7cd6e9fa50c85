//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::BackofficeConfig;
use crate::coordinator::{
    BookingCoordinator, CommentCoordinator, RoomCoordinator, UserCoordinator,
};
use crate::stay::StayClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// Stay API client and the per-entity coordinators, which all share that
/// client (and therefore its response cache and session token).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BackofficeConfig,
    stay: StayClient,
    rooms: RoomCoordinator,
    users: UserCoordinator,
    bookings: BookingCoordinator,
    comments: CommentCoordinator,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: BackofficeConfig) -> Self {
        let stay = StayClient::new(&config.stay);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                rooms: RoomCoordinator::new(stay.clone()),
                users: UserCoordinator::new(stay.clone()),
                bookings: BookingCoordinator::new(stay.clone()),
                comments: CommentCoordinator::new(stay.clone()),
                stay,
            }),
        }
    }

    /// Get a reference to the back-office configuration.
    #[must_use]
    pub fn config(&self) -> &BackofficeConfig {
        &self.inner.config
    }

    /// Get a reference to the Stay API client.
    #[must_use]
    pub fn stay(&self) -> &StayClient {
        &self.inner.stay
    }

    /// Get a reference to the room coordinator.
    #[must_use]
    pub fn rooms(&self) -> &RoomCoordinator {
        &self.inner.rooms
    }

    /// Get a reference to the user coordinator.
    #[must_use]
    pub fn users(&self) -> &UserCoordinator {
        &self.inner.users
    }

    /// Get a reference to the booking coordinator.
    #[must_use]
    pub fn bookings(&self) -> &BookingCoordinator {
        &self.inner.bookings
    }

    /// Get a reference to the comment coordinator.
    #[must_use]
    pub fn comments(&self) -> &CommentCoordinator {
        &self.inner.comments
    }
}
