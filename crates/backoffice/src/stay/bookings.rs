//! Booking endpoints (`/dat-phong`).

use staybook_core::BookingId;
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::types::{Booking, BookingFields};
use super::{StayClient, StayError};

/// Bookings per list page; matches the back-office table size.
pub const BOOKINGS_PAGE_SIZE: u32 = 20;

impl StayClient {
    /// Fetch one page of bookings. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_bookings(&self, page: u32) -> Result<Vec<Booking>, StayError> {
        let key = CacheKey::Bookings { page };
        if let Some(CacheValue::Bookings(bookings)) = self.cache().get(&key).await {
            debug!("Cache hit for booking list");
            return Ok(bookings);
        }

        let bookings: Vec<Booking> = self
            .get_json(
                "dat-phong",
                &[
                    ("page", page.to_string()),
                    ("limit", BOOKINGS_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        self.cache()
            .insert(key, CacheValue::Bookings(bookings.clone()))
            .await;
        Ok(bookings)
    }

    /// Fetch a single booking by id. Cached.
    ///
    /// # Errors
    ///
    /// Returns [`StayError::NotFound`] if the booking does not exist, or
    /// another error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_booking(&self, id: BookingId) -> Result<Booking, StayError> {
        let key = CacheKey::Booking(id);
        if let Some(CacheValue::Booking(booking)) = self.cache().get(&key).await {
            debug!("Cache hit for booking");
            return Ok(*booking);
        }

        let booking: Booking = self.get_json(&format!("dat-phong/{id}"), &[]).await?;

        self.cache()
            .insert(key, CacheValue::Booking(Box::new(booking.clone())))
            .await;
        Ok(booking)
    }

    /// Create a booking. The id is assigned remotely.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the draft or the request fails.
    #[instrument(skip(self, draft), fields(room_id = %draft.room_id, user_id = %draft.user_id))]
    pub async fn create_booking(&self, draft: &BookingFields) -> Result<Booking, StayError> {
        let booking: Booking = self.post_json("dat-phong", draft).await?;
        self.cache().invalidate_bookings();
        Ok(booking)
    }

    /// Update a booking in place. Last write wins at the remote store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the update or the request fails.
    #[instrument(skip(self, fields))]
    pub async fn update_booking(
        &self,
        id: BookingId,
        fields: &BookingFields,
    ) -> Result<Booking, StayError> {
        let body = Booking {
            id,
            fields: fields.clone(),
        };
        let booking: Booking = self.put_json(&format!("dat-phong/{id}"), &body).await?;
        self.cache().invalidate_bookings();
        Ok(booking)
    }

    /// Delete a booking by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the delete or the request fails.
    #[instrument(skip(self))]
    pub async fn delete_booking(&self, id: BookingId) -> Result<(), StayError> {
        let _: serde_json::Value = self.delete_json(&format!("dat-phong/{id}"), &[]).await?;
        self.cache().invalidate_bookings();
        Ok(())
    }
}
