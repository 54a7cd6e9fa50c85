//! Location lookup endpoint (`/vi-tri`).
//!
//! Locations are read-only from the back-office; the single-item lookup
//! exists to validate the location id on the room form.

use staybook_core::LocationId;
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::types::Location;
use super::{StayClient, StayError};

impl StayClient {
    /// Fetch a single location by id. Cached.
    ///
    /// # Errors
    ///
    /// Returns [`StayError::NotFound`] if the location does not exist, or
    /// another error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_location(&self, id: LocationId) -> Result<Location, StayError> {
        let key = CacheKey::Location(id);
        if let Some(CacheValue::Location(location)) = self.cache().get(&key).await {
            debug!("Cache hit for location");
            return Ok(*location);
        }

        let location: Location = self.get_json(&format!("vi-tri/{id}"), &[]).await?;

        self.cache()
            .insert(key, CacheValue::Location(Box::new(location.clone())))
            .await;
        Ok(location)
    }
}
