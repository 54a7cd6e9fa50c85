//! User endpoints (`/users`).
//!
//! One platform quirk survives here: deletion goes through the collection
//! route with a query parameter (`DELETE /users?id=`), unlike every other
//! entity.

use staybook_core::UserId;
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::types::{User, UserDraft};
use super::{StayClient, StayError};

impl StayClient {
    /// Fetch all users. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, StayError> {
        if let Some(CacheValue::Users(users)) = self.cache().get(&CacheKey::Users).await {
            debug!("Cache hit for user list");
            return Ok(users);
        }

        let users: Vec<User> = self.get_json("users", &[]).await?;

        self.cache()
            .insert(CacheKey::Users, CacheValue::Users(users.clone()))
            .await;
        Ok(users)
    }

    /// Fetch a single user by id. Cached.
    ///
    /// # Errors
    ///
    /// Returns [`StayError::NotFound`] if the user does not exist, or another
    /// error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, StayError> {
        let key = CacheKey::User(id);
        if let Some(CacheValue::User(user)) = self.cache().get(&key).await {
            debug!("Cache hit for user");
            return Ok(*user);
        }

        let user: User = self.get_json(&format!("users/{id}"), &[]).await?;

        self.cache()
            .insert(key, CacheValue::User(Box::new(user.clone())))
            .await;
        Ok(user)
    }

    /// Create a user account. The id is assigned remotely.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the draft or the request fails.
    #[instrument(skip(self, draft), fields(email = %draft.email))]
    pub async fn create_user(&self, draft: &UserDraft) -> Result<User, StayError> {
        let user: User = self.post_json("users", draft).await?;
        self.cache().invalidate_users();
        Ok(user)
    }

    /// Update a user. The password is never sent on update.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the update or the request fails.
    #[instrument(skip(self, user))]
    pub async fn update_user(&self, id: UserId, user: &User) -> Result<User, StayError> {
        debug_assert!(user.password.is_none(), "password must not be sent on update");
        let updated: User = self.put_json(&format!("users/{id}"), user).await?;
        self.cache().invalidate_users();
        Ok(updated)
    }

    /// Delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the delete or the request fails.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), StayError> {
        let _: serde_json::Value = self.delete_json("users", &[("id", id.to_string())]).await?;
        self.cache().invalidate_users();
        Ok(())
    }

    /// Upload an avatar for the current session user; returns the updated
    /// user record carrying the new avatar URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is rejected or the request fails.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_avatar(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<User, StayError> {
        let user: User = self
            .post_multipart("users/upload-avatar", &[], file_name, bytes)
            .await?;
        self.cache().invalidate_users();
        Ok(user)
    }
}
