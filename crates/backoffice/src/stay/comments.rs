//! Comment endpoints (`/binh-luan`).

use staybook_core::RoomId;
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::types::{Comment, CommentDraft};
use super::{StayClient, StayError};

impl StayClient {
    /// Fetch all comments for a room. Cached per room.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_comments(&self, room_id: RoomId) -> Result<Vec<Comment>, StayError> {
        let key = CacheKey::Comments(room_id);
        if let Some(CacheValue::Comments(comments)) = self.cache().get(&key).await {
            debug!("Cache hit for comments");
            return Ok(comments);
        }

        let comments: Vec<Comment> = self
            .get_json(&format!("binh-luan/lay-binh-luan-theo-phong/{room_id}"), &[])
            .await?;

        self.cache()
            .insert(key, CacheValue::Comments(comments.clone()))
            .await;
        Ok(comments)
    }

    /// Post a comment; the room's comment cache is invalidated on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the comment or the request fails.
    #[instrument(skip(self, draft), fields(room_id = %draft.room_id))]
    pub async fn create_comment(&self, draft: &CommentDraft) -> Result<Comment, StayError> {
        let comment: Comment = self.post_json("binh-luan", draft).await?;
        self.cache().invalidate_comments(draft.room_id);
        Ok(comment)
    }
}
