//! Stay API client.
//!
//! # Architecture
//!
//! - The remote Stay API is the source of truth - no local sync, direct
//!   REST calls via `reqwest`
//! - In-memory caching via `moka` for read responses (TTL from config);
//!   successful mutations invalidate the affected entity's keys
//! - A fixed request timeout, no automatic retries: failed mutations are
//!   surfaced and the operator resubmits
//! - 401 responses clear the stored session token exactly once
//!
//! # Example
//!
//! ```rust,ignore
//! use staybook_backoffice::stay::StayClient;
//!
//! let client = StayClient::new(&config.stay);
//!
//! // Cached list read
//! let rooms = client.list_rooms(1).await?;
//!
//! // Mutation: invalidates the room cache on success
//! let created = client.create_room(&draft).await?;
//! assert!(created.id.is_assigned());
//! ```

mod cache;
mod client;

pub mod bookings;
pub mod comments;
pub mod locations;
pub mod rooms;
pub mod types;
pub mod users;

pub use cache::{CacheKey, CacheValue, StayCache};
pub use client::StayClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the Stay API.
#[derive(Debug, Error)]
pub enum StayError {
    /// HTTP transport failed (includes the client's fixed timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Session rejected (401). The stored token has been cleared.
    #[error("Unauthorized: session token rejected")]
    Unauthorized,

    /// The server rejected the request with a non-success status.
    #[error("Rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Field the rejection points at, when the server names one.
        field: Option<String>,
        /// Server-reported message, or a generic fallback.
        message: String,
    },
}

impl StayError {
    /// Whether this error means "the referenced entity does not exist".
    ///
    /// The platform answers bad item lookups with either 404 or 400, and
    /// reference validation treats both as "does not exist" while every
    /// other failure stays a transient check error.
    #[must_use]
    pub const fn is_missing_reference(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Rejected { status, .. } => *status == 400 || *status == 404,
            _ => false,
        }
    }
}

/// Fallback message when the server rejection carried no usable text.
pub const GENERIC_REJECTION: &str = "The server rejected the request. Please try again.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stay_error_display() {
        let err = StayError::NotFound("phong-thue/123".to_string());
        assert_eq!(err.to_string(), "Not found: phong-thue/123");

        let err = StayError::Rejected {
            status: 400,
            field: Some("maPhong".to_string()),
            message: "Room ID invalid".to_string(),
        };
        assert_eq!(err.to_string(), "Rejected (400): Room ID invalid");
    }

    #[test]
    fn test_missing_reference_classification() {
        assert!(StayError::NotFound("users/9".into()).is_missing_reference());
        assert!(
            StayError::Rejected {
                status: 400,
                field: None,
                message: GENERIC_REJECTION.into(),
            }
            .is_missing_reference()
        );
        assert!(
            !StayError::Rejected {
                status: 500,
                field: None,
                message: GENERIC_REJECTION.into(),
            }
            .is_missing_reference()
        );
        assert!(!StayError::Unauthorized.is_missing_reference());
    }
}
