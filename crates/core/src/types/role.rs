//! User roles as reported by the Stay API.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role attached to a user account.
///
/// The wire format is the platform's uppercase string (`"ADMIN"` / `"USER"`).
/// Unknown roles deserialize as [`Role::User`] so a new platform role cannot
/// lock the back-office out of its own user list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Back-office administrator.
    Admin,
    /// Regular customer account.
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    /// The wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Error returned when parsing a [`Role`] from an unrecognised string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);
