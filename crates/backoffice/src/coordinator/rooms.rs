//! Room CRUD coordinator.
//!
//! The room form references a location by id; the reference is resolved via
//! the location lookup endpoint and surfaced as a field error when it does
//! not exist. An image can either be given as a URL or staged as an upload
//! that is pushed right after the room is saved.

use serde::{Deserialize, Serialize};
use staybook_core::{LocationId, RoomId};
use tracing::instrument;

use crate::stay::{Location, Room, RoomFields, StayClient};

use super::{CoordinatorError, FieldError, FormMode, ReferenceCheck};

/// Editable state of the room form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomForm {
    #[serde(default)]
    pub mode: FormMode,
    #[serde(default)]
    pub id: Option<RoomId>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_one")]
    pub guests: i64,
    #[serde(default = "default_one")]
    pub bedrooms: i64,
    #[serde(default = "default_one")]
    pub beds: i64,
    #[serde(default = "default_one")]
    pub bathrooms: i64,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub washer: bool,
    #[serde(default)]
    pub iron: bool,
    #[serde(default)]
    pub tv: bool,
    #[serde(default)]
    pub air_conditioning: bool,
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub kitchen: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub pool: bool,
    #[serde(default)]
    pub ironing_board: bool,
    /// Raw location id field value; 0 means "not filled in yet".
    #[serde(default)]
    pub location_id: i64,
    /// When true, an image upload is staged and the URL may stay empty.
    #[serde(default)]
    pub upload_staged: bool,
}

const fn default_one() -> i64 {
    1
}

impl RoomForm {
    /// Empty form for creating a room.
    #[must_use]
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            id: None,
            name: String::new(),
            guests: 1,
            bedrooms: 1,
            beds: 1,
            bathrooms: 1,
            price: 0,
            description: String::new(),
            image_url: String::new(),
            washer: false,
            iron: false,
            tv: false,
            air_conditioning: false,
            wifi: false,
            kitchen: false,
            parking: false,
            pool: false,
            ironing_board: false,
            location_id: 0,
            upload_staged: false,
        }
    }

    /// Form pre-populated from an existing room.
    #[must_use]
    pub fn edit(room: &Room) -> Self {
        let fields = &room.fields;
        Self {
            mode: FormMode::Edit,
            id: Some(room.id),
            name: fields.name.clone(),
            guests: fields.guests,
            bedrooms: fields.bedrooms,
            beds: fields.beds,
            bathrooms: fields.bathrooms,
            price: fields.price,
            description: fields.description.clone(),
            image_url: fields.image_url.clone(),
            washer: fields.washer,
            iron: fields.iron,
            tv: fields.tv,
            air_conditioning: fields.air_conditioning,
            wifi: fields.wifi,
            kitchen: fields.kitchen,
            parking: fields.parking,
            pool: fields.pool,
            ironing_board: fields.ironing_board,
            location_id: fields.location_id.as_i64(),
            upload_staged: false,
        }
    }

    /// Local validation only; the location reference check is separate.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("tenPhong", "Room name is required"));
        }
        if self.guests < 1 {
            errors.push(FieldError::new("khach", "Minimum 1 guest"));
        }
        if self.bedrooms < 1 {
            errors.push(FieldError::new("phongNgu", "Minimum 1 bedroom"));
        }
        if self.beds < 1 {
            errors.push(FieldError::new("giuong", "Minimum 1 bed"));
        }
        if self.bathrooms < 1 {
            errors.push(FieldError::new("phongTam", "Minimum 1 bathroom"));
        }
        if self.price < 1 {
            errors.push(FieldError::new("giaTien", "Price must be greater than 0"));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::new("moTa", "Description is required"));
        }
        if !self.upload_staged && self.image_url.trim().is_empty() {
            errors.push(FieldError::new(
                "hinhAnh",
                "Image URL is required unless uploading a file",
            ));
        }
        if self.location_id < 1 {
            errors.push(FieldError::new(
                "maViTri",
                "Please enter a valid location ID (greater than 0)",
            ));
        }

        errors
    }

    fn fields(&self) -> RoomFields {
        RoomFields {
            name: self.name.clone(),
            guests: self.guests,
            bedrooms: self.bedrooms,
            beds: self.beds,
            bathrooms: self.bathrooms,
            price: self.price,
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            washer: self.washer,
            iron: self.iron,
            tv: self.tv,
            air_conditioning: self.air_conditioning,
            wifi: self.wifi,
            kitchen: self.kitchen,
            parking: self.parking,
            pool: self.pool,
            ironing_board: self.ironing_board,
            location_id: LocationId::new(self.location_id),
        }
    }
}

/// Coordinates room list/create/update/delete against the Stay API.
#[derive(Clone)]
pub struct RoomCoordinator {
    client: StayClient,
}

impl RoomCoordinator {
    /// Create a coordinator over the shared client.
    #[must_use]
    pub const fn new(client: StayClient) -> Self {
        Self { client }
    }

    /// One page of rooms.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the list fetch fails.
    pub async fn list(&self, page: u32) -> Result<Vec<Room>, CoordinatorError> {
        Ok(self.client.list_rooms(page).await?)
    }

    /// Fetch a single room.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the room cannot be fetched.
    pub async fn get(&self, id: RoomId) -> Result<Room, CoordinatorError> {
        Ok(self.client.get_room(id).await?)
    }

    /// Resolve the form's location reference.
    ///
    /// Returns the location (for displaying province/name next to the id
    /// field) together with any field error the check produced.
    pub async fn check_location(&self, form: &RoomForm) -> (Option<Location>, Option<FieldError>) {
        if form.location_id < 1 {
            return (None, None);
        }
        let check = ReferenceCheck::from_result(
            self.client
                .get_location(LocationId::new(form.location_id))
                .await,
        );
        let error = check.field_error("maViTri", "Location");
        match check {
            ReferenceCheck::Exists(location) => (Some(location), None),
            _ => (None, error),
        }
    }

    /// Validate fully (local rules plus the location check) and submit.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Invalid`] when any field error is
    /// outstanding, or a notice-level error for rejected submissions.
    #[instrument(skip(self, form), fields(mode = ?form.mode))]
    pub async fn submit(&self, form: &RoomForm) -> Result<Room, CoordinatorError> {
        let mut errors = form.validate();
        let (_, location_error) = self.check_location(form).await;
        if let Some(error) = location_error {
            errors.push(error);
        }
        if !errors.is_empty() {
            return Err(CoordinatorError::Invalid(errors));
        }

        let fields = form.fields();
        let saved = match (form.mode, form.id) {
            (FormMode::Edit, Some(id)) => self.client.update_room(id, &fields).await?,
            (FormMode::Edit, None) => {
                return Err(CoordinatorError::Notice(
                    "No room selected to edit.".to_string(),
                ));
            }
            (FormMode::Add, _) => self.client.create_room(&fields).await?,
        };
        Ok(saved)
    }

    /// Push a staged image upload for a saved room.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the upload is rejected.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn attach_image(
        &self,
        id: RoomId,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Room, CoordinatorError> {
        Ok(self.client.upload_room_image(id, file_name, bytes).await?)
    }

    /// Delete a room. Callers confirm with the operator first.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the delete is rejected.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: RoomId) -> Result<(), CoordinatorError> {
        self.client.delete_room(id).await?;
        Ok(())
    }
}
