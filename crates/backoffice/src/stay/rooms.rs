//! Room endpoints (`/phong-thue`).

use staybook_core::RoomId;
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::types::{Room, RoomFields};
use super::{StayClient, StayError};

/// Rooms per list page; matches the back-office table size.
pub const ROOMS_PAGE_SIZE: u32 = 50;

impl StayClient {
    /// Fetch one page of rooms. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_rooms(&self, page: u32) -> Result<Vec<Room>, StayError> {
        let key = CacheKey::Rooms { page };
        if let Some(CacheValue::Rooms(rooms)) = self.cache().get(&key).await {
            debug!("Cache hit for room list");
            return Ok(rooms);
        }

        let rooms: Vec<Room> = self
            .get_json(
                "phong-thue",
                &[
                    ("pageIndex", page.to_string()),
                    ("pageSize", ROOMS_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        self.cache()
            .insert(key, CacheValue::Rooms(rooms.clone()))
            .await;
        Ok(rooms)
    }

    /// Fetch a single room by id. Cached.
    ///
    /// # Errors
    ///
    /// Returns [`StayError::NotFound`] if the room does not exist, or another
    /// error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_room(&self, id: RoomId) -> Result<Room, StayError> {
        let key = CacheKey::Room(id);
        if let Some(CacheValue::Room(room)) = self.cache().get(&key).await {
            debug!("Cache hit for room");
            return Ok(*room);
        }

        let room: Room = self.get_json(&format!("phong-thue/{id}"), &[]).await?;

        self.cache()
            .insert(key, CacheValue::Room(Box::new(room.clone())))
            .await;
        Ok(room)
    }

    /// Create a room. The id is assigned remotely; the room cache is
    /// invalidated on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the draft or the request fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_room(&self, draft: &RoomFields) -> Result<Room, StayError> {
        let room: Room = self.post_json("phong-thue", draft).await?;
        self.cache().invalidate_rooms();
        Ok(room)
    }

    /// Update a room in place. Last write wins at the remote store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the update or the request fails.
    #[instrument(skip(self, fields))]
    pub async fn update_room(&self, id: RoomId, fields: &RoomFields) -> Result<Room, StayError> {
        let body = Room {
            id,
            fields: fields.clone(),
        };
        let room: Room = self.put_json(&format!("phong-thue/{id}"), &body).await?;
        self.cache().invalidate_rooms();
        Ok(room)
    }

    /// Delete a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the delete or the request fails.
    #[instrument(skip(self))]
    pub async fn delete_room(&self, id: RoomId) -> Result<(), StayError> {
        let _: serde_json::Value = self.delete_json(&format!("phong-thue/{id}"), &[]).await?;
        self.cache().invalidate_rooms();
        Ok(())
    }

    /// Upload a room photo; the platform stores it and returns the updated
    /// room record.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is rejected or the request fails.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_room_image(
        &self,
        id: RoomId,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Room, StayError> {
        let room: Room = self
            .post_multipart(
                "phong-thue/upload-hinh-phong",
                &[("maPhong", id.to_string())],
                file_name,
                bytes,
            )
            .await?;
        self.cache().invalidate_rooms();
        Ok(room)
    }
}
