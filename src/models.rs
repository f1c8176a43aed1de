//! Wire types exchanged with the booking API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

/// Last valid hour of the day.
pub const MAX_HOUR: u8 = 23;

/// A service professional that can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// One hour of a provider's day and whether it can still be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSlot")]
pub struct AvailabilitySlot {
    pub hour: u8,
    pub available: bool,
}

#[derive(Deserialize)]
struct RawSlot {
    hour: i64,
    available: bool,
}

impl TryFrom<RawSlot> for AvailabilitySlot {
    type Error = String;

    fn try_from(raw: RawSlot) -> Result<Self, Self::Error> {
        match u8::try_from(raw.hour) {
            Ok(hour) if hour <= MAX_HOUR => Ok(Self {
                hour,
                available: raw.available,
            }),
            _ => Err(format!("hour out of range: {}", raw.hour)),
        }
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Body of `POST /appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentRequest {
    pub provider_id: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub date: NaiveDateTime,
}

/// Wire format for appointment timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn serialize_timestamp<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(TIMESTAMP_FORMAT))
}

/// Body of `PUT /profile`.
///
/// The password triple is only present when the user asked to change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub password_change: Option<PasswordChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Body of `POST /sessions`.
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub user: User,
    pub token: String,
}
