//! Booking CRUD coordinator.
//!
//! Bookings reference a room and a user by id; both references are checked
//! against the Stay API while the form is edited (debounced) and again at
//! submit time. A resolved room plus a complete date range also yields the
//! price quote shown alongside the form.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use staybook_core::{BookingId, Price, RoomId, UserId};
use tracing::instrument;

use crate::stay::{Booking, BookingFields, StayClient};

use super::{CoordinatorError, Debouncer, FieldError, FormMode, ReferenceCheck};

/// Editable state of the booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub mode: FormMode,
    /// Set in `Edit` mode; ignored in `Add` mode (ids are remote-assigned).
    #[serde(default)]
    pub id: Option<BookingId>,
    /// Raw id field value; 0 means "not filled in yet".
    #[serde(default)]
    pub room_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default = "default_guests")]
    pub guests: i64,
}

const fn default_guests() -> i64 {
    1
}

impl BookingForm {
    /// Empty form for creating a booking.
    #[must_use]
    pub const fn add() -> Self {
        Self {
            mode: FormMode::Add,
            id: None,
            room_id: 0,
            user_id: 0,
            check_in: None,
            check_out: None,
            guests: 1,
        }
    }

    /// Form pre-populated from an existing booking.
    #[must_use]
    pub fn edit(booking: &Booking) -> Self {
        Self {
            mode: FormMode::Edit,
            id: Some(booking.id),
            room_id: booking.fields.room_id.as_i64(),
            user_id: booking.fields.user_id.as_i64(),
            check_in: Some(booking.fields.check_in),
            check_out: Some(booking.fields.check_out),
            guests: booking.fields.guests,
        }
    }

    /// Local validation only; reference checks are separate (and remote).
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        match self.room_id {
            0 => errors.push(FieldError::new("maPhong", "Please enter a room ID.")),
            id if id < 0 => errors.push(FieldError::new(
                "maPhong",
                "Room ID must be a positive number.",
            )),
            _ => {}
        }

        match self.user_id {
            0 => errors.push(FieldError::new("maNguoiDung", "Please enter a user ID.")),
            id if id < 0 => errors.push(FieldError::new(
                "maNguoiDung",
                "User ID must be a positive number.",
            )),
            _ => {}
        }

        if self.check_in.is_none() {
            errors.push(FieldError::new("ngayDen", "Please select a check-in date."));
        }

        match (self.check_in, self.check_out) {
            (_, None) => errors.push(FieldError::new(
                "ngayDi",
                "Please select a check-out date.",
            )),
            (Some(check_in), Some(check_out)) if check_out <= check_in => {
                errors.push(FieldError::new(
                    "ngayDi",
                    "Check-out date must be after check-in date.",
                ));
            }
            _ => {}
        }

        if self.guests < 1 {
            errors.push(FieldError::new(
                "soLuongKhach",
                "Number of guests must be at least 1.",
            ));
        }

        errors
    }

    /// Wire fields, available once the form is locally valid.
    fn fields(&self) -> Option<BookingFields> {
        Some(BookingFields {
            room_id: RoomId::new(self.room_id),
            user_id: UserId::new(self.user_id),
            check_in: self.check_in?,
            check_out: self.check_out?,
            guests: self.guests,
        })
    }
}

/// Price quote for a resolved room and date range.
#[derive(Debug, Clone, Serialize)]
pub struct BookingQuote {
    pub room_name: String,
    pub nightly_price: Price,
    pub nights: i64,
    pub total: Price,
}

/// Coordinates booking list/create/update/delete against the Stay API.
#[derive(Clone)]
pub struct BookingCoordinator {
    client: StayClient,
}

impl BookingCoordinator {
    /// Create a coordinator over the shared client.
    #[must_use]
    pub const fn new(client: StayClient) -> Self {
        Self { client }
    }

    /// One page of bookings, newest first (the admin table ordering).
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the list fetch fails.
    pub async fn list(&self, page: u32) -> Result<Vec<Booking>, CoordinatorError> {
        let mut bookings = self.client.list_bookings(page).await?;
        bookings.reverse();
        Ok(bookings)
    }

    /// Fetch a single booking.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the booking cannot be fetched.
    pub async fn get(&self, id: BookingId) -> Result<Booking, CoordinatorError> {
        Ok(self.client.get_booking(id).await?)
    }

    /// Check both entity references concurrently.
    ///
    /// Ids that are not positive are skipped (local validation already
    /// covers them). Results are independent; each lookup maps to its own
    /// field error.
    pub async fn check_references(&self, form: &BookingForm) -> Vec<FieldError> {
        let room_check = async {
            if form.room_id >= 1 {
                Some(ReferenceCheck::from_result(
                    self.client.get_room(RoomId::new(form.room_id)).await,
                ))
            } else {
                None
            }
        };
        let user_check = async {
            if form.user_id >= 1 {
                Some(ReferenceCheck::from_result(
                    self.client.get_user(UserId::new(form.user_id)).await,
                ))
            } else {
                None
            }
        };

        let (room, user) = tokio::join!(room_check, user_check);

        let mut errors = Vec::new();
        if let Some(error) = room.and_then(|check| check.field_error("maPhong", "Room")) {
            errors.push(error);
        }
        if let Some(error) = user.and_then(|check| check.field_error("maNguoiDung", "User")) {
            errors.push(error);
        }
        errors
    }

    /// Compute the quote for the form's room and date range, when all three
    /// resolve. Total = nightly price x nights.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the room lookup fails for a reason
    /// other than "does not exist".
    pub async fn quote(&self, form: &BookingForm) -> Result<Option<BookingQuote>, CoordinatorError> {
        let (Some(check_in), Some(check_out)) = (form.check_in, form.check_out) else {
            return Ok(None);
        };
        if form.room_id < 1 || check_out <= check_in {
            return Ok(None);
        }

        let check =
            ReferenceCheck::from_result(self.client.get_room(RoomId::new(form.room_id)).await);
        let room = match check {
            ReferenceCheck::Exists(room) => room,
            ReferenceCheck::Missing => return Ok(None),
            ReferenceCheck::Unverified => {
                return Err(CoordinatorError::Notice(
                    "Error checking Room ID. Please try again.".to_string(),
                ));
            }
        };

        let nights = (check_out - check_in).num_days();
        let nightly = Price::from_dollars(room.fields.price);
        Ok(Some(BookingQuote {
            room_name: room.fields.name,
            nightly_price: nightly,
            nights,
            total: nightly.total_for_nights(nights),
        }))
    }

    /// Validate fully (local rules plus reference checks) and submit.
    ///
    /// The verb follows the form mode: POST the draft in `Add`, PUT the full
    /// record in `Edit`. The booking cache is invalidated on success.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Invalid`] when any field error is
    /// outstanding, or a notice-level error for rejected submissions.
    #[instrument(skip(self, form), fields(mode = ?form.mode))]
    pub async fn submit(&self, form: &BookingForm) -> Result<Booking, CoordinatorError> {
        let mut errors = form.validate();
        errors.extend(self.check_references(form).await);
        if !errors.is_empty() {
            return Err(CoordinatorError::Invalid(errors));
        }

        // Local validation passed, so the date fields are present.
        let fields = form
            .fields()
            .ok_or_else(|| CoordinatorError::Notice(super::GENERIC_SAVE_MESSAGE.to_string()))?;

        let saved = match (form.mode, form.id) {
            (FormMode::Edit, Some(id)) => self.client.update_booking(id, &fields).await?,
            (FormMode::Edit, None) => {
                return Err(CoordinatorError::Notice(
                    "No booking selected to edit.".to_string(),
                ));
            }
            (FormMode::Add, _) => self.client.create_booking(&fields).await?,
        };
        Ok(saved)
    }

    /// Delete a booking. Callers confirm with the operator first.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the delete is rejected.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: BookingId) -> Result<(), CoordinatorError> {
        self.client.delete_booking(id).await?;
        Ok(())
    }

    /// Start a live reference watcher for an open form.
    #[must_use]
    pub fn watch_references(&self) -> ReferenceWatcher {
        ReferenceWatcher::new(self.clone(), Debouncer::FIELD_DELAY)
    }
}

/// Debounced reference checking for an open booking form.
///
/// Each id-field change schedules a lookup after a fixed delay; rapid
/// changes supersede each other so only the latest value is checked. The
/// accumulated field errors gate submission in the UI.
pub struct ReferenceWatcher {
    coordinator: BookingCoordinator,
    room_debouncer: Debouncer,
    user_debouncer: Debouncer,
    errors: Arc<Mutex<Vec<FieldError>>>,
}

impl ReferenceWatcher {
    fn new(coordinator: BookingCoordinator, delay: std::time::Duration) -> Self {
        Self {
            coordinator,
            room_debouncer: Debouncer::new(delay),
            user_debouncer: Debouncer::new(delay),
            errors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// React to a room id field change.
    pub fn room_id_changed(&self, room_id: i64) {
        let client = self.coordinator.client.clone();
        let errors = Arc::clone(&self.errors);
        self.room_debouncer.schedule(async move {
            let check = if room_id >= 1 {
                ReferenceCheck::from_result(client.get_room(RoomId::new(room_id)).await)
                    .field_error("maPhong", "Room")
            } else {
                None
            };
            replace_field_error(&errors, "maPhong", check);
        });
    }

    /// React to a user id field change.
    pub fn user_id_changed(&self, user_id: i64) {
        let client = self.coordinator.client.clone();
        let errors = Arc::clone(&self.errors);
        self.user_debouncer.schedule(async move {
            let check = if user_id >= 1 {
                ReferenceCheck::from_result(client.get_user(UserId::new(user_id)).await)
                    .field_error("maNguoiDung", "User")
            } else {
                None
            };
            replace_field_error(&errors, "maNguoiDung", check);
        });
    }

    /// Current reference errors; a non-empty list disables submission.
    #[must_use]
    pub fn current_errors(&self) -> Vec<FieldError> {
        self.errors
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

fn replace_field_error(
    errors: &Arc<Mutex<Vec<FieldError>>>,
    field: &str,
    new_error: Option<FieldError>,
) {
    let mut errors = errors
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    errors.retain(|e| e.field != field);
    if let Some(error) = new_error {
        errors.push(error);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> BookingForm {
        BookingForm {
            mode: FormMode::Add,
            id: None,
            room_id: 3,
            user_id: 4,
            check_in: NaiveDate::from_ymd_opt(2024, 6, 1),
            check_out: NaiveDate::from_ymd_opt(2024, 6, 4),
            guests: 2,
        }
    }

    #[test]
    fn test_valid_form_passes_local_validation() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_empty_ids_are_required() {
        let form = BookingForm::add();
        let errors = form.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"maPhong"));
        assert!(fields.contains(&"maNguoiDung"));
        assert!(fields.contains(&"ngayDen"));
        assert!(fields.contains(&"ngayDi"));
    }

    #[test]
    fn test_checkout_must_be_strictly_after_checkin() {
        let mut form = valid_form();
        form.check_out = form.check_in;
        let errors = form.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "ngayDi"
                    && e.message == "Check-out date must be after check-in date.")
        );

        // One day later is enough
        form.check_out = NaiveDate::from_ymd_opt(2024, 6, 2);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_guests_must_be_at_least_one() {
        let mut form = valid_form();
        form.guests = 0;
        let errors = form.validate();
        assert!(errors.iter().any(|e| e.field == "soLuongKhach"));
    }

    #[test]
    fn test_negative_id_message_differs_from_missing() {
        let mut form = valid_form();
        form.room_id = -2;
        let errors = form.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "maPhong" && e.message == "Room ID must be a positive number.")
        );
    }

    #[test]
    fn test_edit_prefills_from_booking() {
        let booking = Booking {
            id: BookingId::new(12),
            fields: BookingFields {
                room_id: RoomId::new(3),
                user_id: UserId::new(4),
                check_in: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                check_out: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
                guests: 2,
            },
        };
        let form = BookingForm::edit(&booking);
        assert_eq!(form.mode, FormMode::Edit);
        assert_eq!(form.id, Some(BookingId::new(12)));
        assert_eq!(form.room_id, 3);
        assert!(form.validate().is_empty());
    }
}
