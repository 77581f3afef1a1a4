use crate::app::submission::SubmissionService;
use crate::domain::model::{DeviceClass, NewRsvp, RsvpResponse};
use crate::storage::store::ResponseStore;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<SubmissionService>,
    pub store: Arc<dyn ResponseStore>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SubmitRsvpRequest {
    /// Exactly 10 ASCII digits; the natural external key.
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub response: RsvpResponse,
    #[serde(default)]
    pub comment: Option<String>,
    pub device_class: DeviceClass,
    pub verification_token: String,
}

impl SubmitRsvpRequest {
    /// Length/shape checks happen here at the transport layer; the
    /// submission core assumes validated input.
    pub fn validate(&self) -> Result<(), String> {
        if self.phone_number.len() != 10
            || !self.phone_number.bytes().all(|b| b.is_ascii_digit())
        {
            return Err("phone_number must be exactly 10 digits".to_string());
        }
        if self.first_name.trim().is_empty() || self.first_name.chars().count() > 50 {
            return Err("first_name must be 1-50 characters".to_string());
        }
        if self.last_name.trim().is_empty() || self.last_name.chars().count() > 50 {
            return Err("last_name must be 1-50 characters".to_string());
        }
        if let Some(comment) = &self.comment {
            if comment.chars().count() > 500 {
                return Err("comment must be at most 500 characters".to_string());
            }
        }
        if self.verification_token.trim().is_empty() {
            return Err("verification_token is required".to_string());
        }
        Ok(())
    }

    pub fn into_parts(self) -> (NewRsvp, String) {
        (
            NewRsvp {
                phone_number: self.phone_number,
                first_name: self.first_name,
                last_name: self.last_name,
                response: self.response,
                comment: self.comment,
                device_class: self.device_class,
            },
            self.verification_token,
        )
    }
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SubmitRsvpRequest {
        SubmitRsvpRequest {
            phone_number: "5551234567".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            response: RsvpResponse::Yes,
            comment: None,
            device_class: DeviceClass::Android,
            verification_token: "ok".to_string(),
        }
    }

    #[test]
    fn accepts_a_valid_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn rejects_bad_phone_numbers() {
        for phone in ["555123456", "55512345678", "555123456a", ""] {
            let mut req = valid_request();
            req.phone_number = phone.to_string();
            assert!(req.validate().is_err(), "accepted {:?}", phone);
        }
    }

    #[test]
    fn rejects_out_of_bound_fields() {
        let mut req = valid_request();
        req.first_name = " ".to_string();
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.last_name = "x".repeat(51);
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.comment = Some("x".repeat(501));
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.verification_token = "  ".to_string();
        assert!(req.validate().is_err());
    }
}
