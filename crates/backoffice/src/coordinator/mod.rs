//! CRUD mutation coordinators.
//!
//! One coordinator per entity (rooms, users, bookings, comments), all
//! following the same workflow: read the cached collection, pre-populate a
//! form from a selected record or empty defaults, validate locally, check
//! remote references, submit create/update/delete, and let the client
//! invalidate the cached collection on success. Failures surface as
//! field-keyed errors, transient notices, or the missing-record and
//! expired-session cases, never as process faults.
//!
//! Concurrent edits are not reconciled: last write wins at the remote store.

pub mod bookings;
pub mod comments;
pub mod debounce;
pub mod rooms;
pub mod users;

pub use bookings::{BookingCoordinator, BookingForm, BookingQuote};
pub use comments::{COMMENTS_PER_PAGE, CommentCoordinator, CommentForm, PageItem};
pub use debounce::Debouncer;
pub use rooms::{RoomCoordinator, RoomForm};
pub use users::{UserCoordinator, UserForm};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stay::StayError;

/// Fallback notice when a save fails without a usable server message.
pub const GENERIC_SAVE_MESSAGE: &str = "An error occurred while saving. Please try again.";

/// Which endpoint verb a form submit uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// Create via POST to the collection endpoint.
    #[default]
    Add,
    /// Update via PUT to the item endpoint.
    Edit,
}

/// A validation error attached to a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// How a coordinator operation failed.
///
/// Every failure is recoverable; callers re-render the form (for
/// [`CoordinatorError::Invalid`]), show a transient notice, or surface the
/// missing record / expired session as-is.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The form has field-level problems and was not (or must not be)
    /// submitted.
    #[error("validation failed: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),

    /// The operation failed for a non-field reason; show the message and
    /// let the operator resubmit.
    #[error("{0}")]
    Notice(String),

    /// The requested record does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operator session is missing or was expired by the platform.
    #[error("Session expired. Please sign in again.")]
    Unauthorized,
}

fn format_field_errors(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return "(no details)".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<StayError> for CoordinatorError {
    fn from(err: StayError) -> Self {
        match err {
            StayError::Rejected {
                field: Some(field),
                message,
                ..
            } => Self::Invalid(vec![FieldError::new(field, message)]),
            StayError::Rejected { message, .. } => Self::Notice(message),
            StayError::Unauthorized => Self::Unauthorized,
            StayError::NotFound(resource) => Self::NotFound(resource),
            StayError::Http(_) | StayError::Parse(_) => {
                Self::Notice(GENERIC_SAVE_MESSAGE.to_string())
            }
        }
    }
}

/// Outcome of a remote reference lookup during form editing.
#[derive(Debug)]
pub enum ReferenceCheck<T> {
    /// The referenced entity resolved.
    Exists(T),
    /// The id does not exist (404, or the platform's 400 for a bad id).
    Missing,
    /// The lookup itself failed; distinct from "does not exist".
    Unverified,
}

impl<T> ReferenceCheck<T> {
    /// Classify a lookup result.
    pub fn from_result(result: Result<T, StayError>) -> Self {
        match result {
            Ok(value) => Self::Exists(value),
            Err(err) if err.is_missing_reference() => Self::Missing,
            Err(_) => Self::Unverified,
        }
    }

    /// The field error this check contributes, if any.
    #[must_use]
    pub fn field_error(&self, field: &str, label: &str) -> Option<FieldError> {
        match self {
            Self::Exists(_) => None,
            Self::Missing => Some(FieldError::new(
                field,
                format!("{label} ID does not exist or is invalid."),
            )),
            Self::Unverified => Some(FieldError::new(
                field,
                format!("Error checking {label} ID. Please try again."),
            )),
        }
    }

    /// The resolved entity, when the check succeeded.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Exists(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_field_rejection_becomes_field_error() {
        let err = CoordinatorError::from(StayError::Rejected {
            status: 400,
            field: Some("maPhong".to_string()),
            message: "Room ID invalid".to_string(),
        });
        let CoordinatorError::Invalid(fields) = err else {
            panic!("expected field errors");
        };
        assert_eq!(fields, vec![FieldError::new("maPhong", "Room ID invalid")]);
    }

    #[test]
    fn test_server_message_becomes_notice() {
        let err = CoordinatorError::from(StayError::Rejected {
            status: 409,
            field: None,
            message: "Email already taken".to_string(),
        });
        assert!(matches!(err, CoordinatorError::Notice(msg) if msg == "Email already taken"));
    }

    #[test]
    fn test_transport_failure_becomes_generic_notice() {
        let err = CoordinatorError::from(StayError::Parse(
            serde_json::from_str::<i32>("x").expect_err("bad json"),
        ));
        assert!(matches!(err, CoordinatorError::Notice(msg) if msg == GENERIC_SAVE_MESSAGE));
    }

    #[test]
    fn test_not_found_and_unauthorized_stay_distinct() {
        let err = CoordinatorError::from(StayError::NotFound("phong-thue/9".to_string()));
        assert!(matches!(err, CoordinatorError::NotFound(ref r) if r == "phong-thue/9"));

        let err = CoordinatorError::from(StayError::Unauthorized);
        assert!(matches!(err, CoordinatorError::Unauthorized));
        assert_eq!(err.to_string(), "Session expired. Please sign in again.");
    }

    #[test]
    fn test_reference_check_classification() {
        let missing: ReferenceCheck<()> =
            ReferenceCheck::from_result(Err(StayError::NotFound("users/9".into())));
        let error = missing.field_error("maNguoiDung", "User").expect("error");
        assert_eq!(error.message, "User ID does not exist or is invalid.");

        let unverified: ReferenceCheck<()> =
            ReferenceCheck::from_result(Err(StayError::Unauthorized));
        let error = unverified.field_error("maNguoiDung", "User").expect("error");
        assert_eq!(error.message, "Error checking User ID. Please try again.");

        let exists = ReferenceCheck::from_result(Ok::<_, StayError>(7));
        assert!(exists.field_error("maPhong", "Room").is_none());
        assert_eq!(exists.value(), Some(&7));
    }
}
