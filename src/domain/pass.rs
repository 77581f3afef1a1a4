//! Wallet-pass issuance seam.

use crate::domain::model::{DeviceClass, EventDetails, PassReference, RsvpResponse};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("pass issuance failed: {reason}")]
pub struct IssuanceError {
    pub reason: String,
}

impl IssuanceError {
    pub fn new(reason: impl Into<String>) -> Self {
        IssuanceError {
            reason: reason.into(),
        }
    }
}

/// Guest data carried in the credential body, plus fixed event metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PassPayload {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub response: RsvpResponse,
    #[serde(flatten)]
    pub event: EventDetails,
}

/// Issues a wallet credential for a guest.
///
/// Stateless: each call yields a fresh, globally-unique `pass_id` (no
/// caching), and the retrieval URL shape is a pure function of the device
/// class. Implementations have no dependency on the response store.
#[async_trait]
pub trait PassIssuer: Send + Sync {
    async fn issue(
        &self,
        device_class: DeviceClass,
        guest: &PassPayload,
    ) -> Result<PassReference, IssuanceError>;
}
