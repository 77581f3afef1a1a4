//! Domain model for guest RSVPs and wallet-pass references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A guest's attendance answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RsvpResponse {
    Yes,
    Maybe,
    No,
}

impl RsvpResponse {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpResponse::Yes => "Yes",
            RsvpResponse::Maybe => "Maybe",
            RsvpResponse::No => "No",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Yes" => Some(RsvpResponse::Yes),
            "Maybe" => Some(RsvpResponse::Maybe),
            "No" => Some(RsvpResponse::No),
            _ => None,
        }
    }

    /// Yes/Maybe guests get a wallet pass; No guests do not.
    pub fn wants_pass(&self) -> bool {
        matches!(self, RsvpResponse::Yes | RsvpResponse::Maybe)
    }
}

/// Device classification submitted with the RSVP; selects the wallet format
/// when a pass is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DeviceClass {
    #[serde(rename = "iPhone")]
    IPhone,
    Android,
    Other,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::IPhone => "iPhone",
            DeviceClass::Android => "Android",
            DeviceClass::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "iPhone" => Some(DeviceClass::IPhone),
            "Android" => Some(DeviceClass::Android),
            "Other" => Some(DeviceClass::Other),
            _ => None,
        }
    }
}

/// Fields a guest submits; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewRsvp {
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub response: RsvpResponse,
    pub comment: Option<String>,
    pub device_class: DeviceClass,
}

/// A persisted RSVP.
///
/// `pass_id` and `pass_url` are both null until a pass is attached, and are
/// only ever set together. A `No` response never carries a pass pair.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RsvpRecord {
    pub id: i64,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub response: RsvpResponse,
    pub comment: Option<String>,
    pub device_class: DeviceClass,
    pub pass_id: Option<String>,
    pub pass_url: Option<String>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Reference to an issued wallet credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PassReference {
    pub pass_id: String,
    pub pass_url: String,
    pub qr_code_url: String,
}

/// Fixed event metadata embedded into issued passes.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub date: String,
    pub time: String,
    pub location: String,
}

/// Public roster projection: first name, masked last name, comment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RsvpDisplay {
    pub first_name: String,
    pub last_name_initial: String,
    pub comment: Option<String>,
}

impl From<&RsvpRecord> for RsvpDisplay {
    fn from(record: &RsvpRecord) -> Self {
        let initial = record
            .last_name
            .chars()
            .next()
            .map(|c| format!("{}.", c.to_uppercase()))
            .unwrap_or_default();
        RsvpDisplay {
            first_name: record.first_name.clone(),
            last_name_initial: initial,
            comment: record.comment.clone(),
        }
    }
}
