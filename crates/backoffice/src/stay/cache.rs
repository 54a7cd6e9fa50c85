//! Response cache for the Stay API client.
//!
//! Read-through with a fixed TTL; mutations invalidate every key belonging
//! to the touched entity (all list pages plus the item) via moka's
//! invalidation closures. Staleness inside the TTL is tolerated by design.

use std::time::Duration;

use moka::future::Cache;
use staybook_core::{BookingId, LocationId, RoomId, UserId};

use super::types::{Booking, Comment, Location, Room, User};

/// Cache key, one variant per cacheable query.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Rooms { page: u32 },
    Room(RoomId),
    Users,
    User(UserId),
    Bookings { page: u32 },
    Booking(BookingId),
    Location(LocationId),
    Comments(RoomId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Rooms(Vec<Room>),
    Room(Box<Room>),
    Users(Vec<User>),
    User(Box<User>),
    Bookings(Vec<Booking>),
    Booking(Box<Booking>),
    Location(Box<Location>),
    Comments(Vec<Comment>),
}

/// TTL cache over Stay API responses.
#[derive(Clone)]
pub struct StayCache {
    inner: Cache<CacheKey, CacheValue>,
}

impl StayCache {
    /// Create a cache with the given entry TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(1000)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();
        Self { inner }
    }

    /// Look up a cached value.
    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.inner.get(key).await
    }

    /// Store a value.
    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        self.inner.insert(key, value).await;
    }

    /// Drop a single key.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.inner.invalidate(key).await;
    }

    /// Invalidate every room key: all list pages and all items.
    pub fn invalidate_rooms(&self) {
        self.invalidate_matching(|key| matches!(key, CacheKey::Rooms { .. } | CacheKey::Room(_)));
    }

    /// Invalidate every user key.
    pub fn invalidate_users(&self) {
        self.invalidate_matching(|key| matches!(key, CacheKey::Users | CacheKey::User(_)));
    }

    /// Invalidate every booking key.
    pub fn invalidate_bookings(&self) {
        self.invalidate_matching(|key| {
            matches!(key, CacheKey::Bookings { .. } | CacheKey::Booking(_))
        });
    }

    /// Invalidate the comment list of one room.
    pub fn invalidate_comments(&self, room_id: RoomId) {
        self.invalidate_matching(move |key| matches!(key, CacheKey::Comments(id) if *id == room_id));
    }

    fn invalidate_matching<F>(&self, predicate: F)
    where
        F: Fn(&CacheKey) -> bool + Send + Sync + 'static,
    {
        // Closure support is enabled at build time, so registration cannot
        // fail in practice; a failure here only means staler reads.
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |key, _| predicate(key))
        {
            tracing::error!(error = %e, "failed to register cache invalidation predicate");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use staybook_core::Role;

    fn sample_user(id: i64) -> User {
        User {
            id: UserId::new(id),
            name: format!("user-{id}"),
            email: format!("user{id}@example.com"),
            password: None,
            phone: None,
            birthday: None,
            avatar: None,
            gender: true,
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = StayCache::new(Duration::from_secs(60));
        cache
            .insert(CacheKey::Users, CacheValue::Users(vec![sample_user(1)]))
            .await;

        let Some(CacheValue::Users(users)) = cache.get(&CacheKey::Users).await else {
            panic!("expected cached user list");
        };
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_entity_invalidation_spans_lists_and_items() {
        let cache = StayCache::new(Duration::from_secs(60));
        cache
            .insert(CacheKey::Users, CacheValue::Users(vec![sample_user(1)]))
            .await;
        cache
            .insert(
                CacheKey::User(UserId::new(1)),
                CacheValue::User(Box::new(sample_user(1))),
            )
            .await;
        cache
            .insert(CacheKey::Bookings { page: 1 }, CacheValue::Bookings(vec![]))
            .await;

        cache.invalidate_users();

        assert!(cache.get(&CacheKey::Users).await.is_none());
        assert!(cache.get(&CacheKey::User(UserId::new(1))).await.is_none());
        // Other entities are untouched
        assert!(cache.get(&CacheKey::Bookings { page: 1 }).await.is_some());
    }

    #[tokio::test]
    async fn test_comment_invalidation_is_per_room() {
        let cache = StayCache::new(Duration::from_secs(60));
        cache
            .insert(CacheKey::Comments(RoomId::new(1)), CacheValue::Comments(vec![]))
            .await;
        cache
            .insert(CacheKey::Comments(RoomId::new(2)), CacheValue::Comments(vec![]))
            .await;

        cache.invalidate_comments(RoomId::new(1));

        assert!(cache.get(&CacheKey::Comments(RoomId::new(1))).await.is_none());
        assert!(cache.get(&CacheKey::Comments(RoomId::new(2))).await.is_some());
    }
}
