//! Wire types for the Stay API.
//!
//! The platform keeps its original Vietnamese field names on the wire
//! (`tenPhong`, `giaTien`, `maPhong`, ...); the Rust structs use English
//! names with serde renames so the rest of the codebase stays readable.
//!
//! Responses arrive wrapped in the platform envelope:
//! `{ "statusCode": 200, "content": <payload>, "dateTime": "..." }`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use staybook_core::{BookingId, CommentId, LocationId, Role, RoomId, UserId};

/// Response envelope around every successful Stay API payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// HTTP-style status code repeated in the body.
    pub status_code: i64,
    /// The actual payload.
    pub content: T,
}

/// Loosely-typed rejection body for non-success responses.
///
/// The platform is inconsistent here: validation rejections carry
/// `{ field, message }`, most other errors put the human message in either
/// `message` or `content`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionBody {
    pub status_code: Option<i64>,
    pub field: Option<String>,
    pub message: Option<String>,
    pub content: Option<serde_json::Value>,
}

impl RejectionBody {
    /// Best-effort human-readable message, if the body carried one.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        if let Some(message) = self.message {
            return Some(message);
        }
        match self.content {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

/// Serde adapter for the platform's date fields.
///
/// Dates are submitted as `YYYY-MM-DD` but come back either bare or as a
/// full ISO datetime (`2024-05-01T00:00:00`); deserialization accepts both
/// by reading only the date prefix.
pub mod stay_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    /// Serialize a date in the `YYYY-MM-DD` submission format.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    /// Deserialize a date from either `YYYY-MM-DD` or an ISO datetime.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("unparseable date: {raw}")))
    }

    /// Parse a Stay API date string, tolerating a trailing time component.
    #[must_use]
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, FORMAT).ok()
    }
}

// =============================================================================
// Rooms
// =============================================================================

/// A rentable room as stored by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(flatten)]
    pub fields: RoomFields,
}

/// Room attributes without an identifier; doubles as the create draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomFields {
    #[serde(rename = "tenPhong")]
    pub name: String,
    #[serde(rename = "khach")]
    pub guests: i64,
    #[serde(rename = "phongNgu")]
    pub bedrooms: i64,
    #[serde(rename = "giuong")]
    pub beds: i64,
    #[serde(rename = "phongTam")]
    pub bathrooms: i64,
    /// Nightly price in whole dollars.
    #[serde(rename = "giaTien")]
    pub price: i64,
    #[serde(rename = "moTa")]
    pub description: String,
    #[serde(rename = "hinhAnh")]
    pub image_url: String,
    #[serde(rename = "mayGiat")]
    pub washer: bool,
    #[serde(rename = "banLa")]
    pub iron: bool,
    #[serde(rename = "tivi")]
    pub tv: bool,
    #[serde(rename = "dieuHoa")]
    pub air_conditioning: bool,
    pub wifi: bool,
    #[serde(rename = "bep")]
    pub kitchen: bool,
    #[serde(rename = "doXe")]
    pub parking: bool,
    #[serde(rename = "hoBoi")]
    pub pool: bool,
    #[serde(rename = "banUi")]
    pub ironing_board: bool,
    #[serde(rename = "maViTri")]
    pub location_id: LocationId,
}

// =============================================================================
// Users
// =============================================================================

/// A platform user account.
///
/// `password` is write-only: the platform never echoes it back, and the
/// client only sends it on account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Birthday as reported by the platform; format varies, so kept raw.
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub gender: bool,
    #[serde(default)]
    pub role: Role,
}

/// User attributes for account creation (no id; password required).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub gender: bool,
    #[serde(default)]
    pub role: Role,
}

// =============================================================================
// Bookings
// =============================================================================

/// A booking row linking a room, a user, and a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    #[serde(flatten)]
    pub fields: BookingFields,
}

/// Booking attributes without an identifier; doubles as the create draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingFields {
    #[serde(rename = "maPhong")]
    pub room_id: RoomId,
    #[serde(rename = "maNguoiDung")]
    pub user_id: UserId,
    #[serde(rename = "ngayDen", with = "stay_date")]
    pub check_in: NaiveDate,
    #[serde(rename = "ngayDi", with = "stay_date")]
    pub check_out: NaiveDate,
    #[serde(rename = "soLuongKhach")]
    pub guests: i64,
}

impl BookingFields {
    /// Whole nights between check-in and check-out.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

// =============================================================================
// Comments
// =============================================================================

/// A room review left by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(rename = "maPhong")]
    pub room_id: RoomId,
    #[serde(rename = "maNguoiBinhLuan")]
    pub commenter_id: UserId,
    /// ISO datetime of the comment, kept raw for display.
    #[serde(rename = "ngayBinhLuan")]
    pub date: String,
    #[serde(rename = "noiDung")]
    pub content: String,
    /// Star rating, 1 to 5.
    #[serde(rename = "saoBinhLuan")]
    pub rating: u8,
}

/// A new comment to submit (id assigned remotely).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDraft {
    #[serde(rename = "maPhong")]
    pub room_id: RoomId,
    #[serde(rename = "maNguoiBinhLuan")]
    pub commenter_id: UserId,
    #[serde(rename = "ngayBinhLuan")]
    pub date: String,
    #[serde(rename = "noiDung")]
    pub content: String,
    #[serde(rename = "saoBinhLuan")]
    pub rating: u8,
}

// =============================================================================
// Locations
// =============================================================================

/// A location record, used only as a lookup target when editing rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    #[serde(rename = "tenViTri")]
    pub name: String,
    #[serde(rename = "tinhThanh")]
    pub province: String,
    #[serde(rename = "quocGia")]
    pub country: String,
    #[serde(rename = "hinhAnh", default)]
    pub image_url: Option<String>,
}
