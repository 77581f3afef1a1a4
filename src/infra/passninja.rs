//! Network-backed [`PassIssuer`] targeting a PassNinja-style provider.
//!
//! The pass identifier is generated locally (timestamp + random suffix, so
//! two issuances can never collide), registered upstream, and the retrieval
//! URLs are derived from the device class.

use crate::domain::model::{DeviceClass, PassReference};
use crate::domain::pass::{IssuanceError, PassIssuer, PassPayload};
use crate::infra::config;
use async_trait::async_trait;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};

pub struct PassNinjaIssuer {
    client: reqwest::Client,
    base_url: String,
}

impl PassNinjaIssuer {
    pub fn from_env() -> Self {
        Self::new(config::pass_api_base_url())
    }

    pub fn new(base_url: String) -> Self {
        PassNinjaIssuer {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Fresh identifier per call; never cached or reused.
pub fn new_pass_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!(
        "pass_{}_{}",
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

/// Retrieval URL shape is a pure function of the device class.
pub fn pass_url_for(base_url: &str, device_class: DeviceClass, pass_id: &str) -> String {
    match device_class {
        // iOS Wallet passes use the .pkpass download format.
        DeviceClass::IPhone => format!("{}/v1/passes/{}/download.pkpass", base_url, pass_id),
        // Google Wallet save flow.
        DeviceClass::Android => format!("https://pay.google.com/gp/v/save/{}", pass_id),
        // Fallback for other devices: web-viewable pass.
        DeviceClass::Other => format!("{}/v1/passes/{}/view", base_url, pass_id),
    }
}

/// QR retrieval URL, always included regardless of device class.
pub fn qr_url_for(base_url: &str, pass_id: &str) -> String {
    format!("{}/v1/passes/{}/qr", base_url, pass_id)
}

#[async_trait]
impl PassIssuer for PassNinjaIssuer {
    async fn issue(
        &self,
        device_class: DeviceClass,
        guest: &PassPayload,
    ) -> Result<PassReference, IssuanceError> {
        let pass_id = new_pass_id();

        let body = serde_json::json!({
            "pass_id": pass_id,
            "device_class": device_class,
            "guest": guest,
        });

        let response = self
            .client
            .post(format!("{}/v1/passes", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| IssuanceError::new(format!("pass provider unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(IssuanceError::new(format!(
                "pass provider returned status {}",
                response.status()
            )));
        }

        Ok(PassReference {
            pass_url: pass_url_for(&self.base_url, device_class, &pass_id),
            qr_code_url: qr_url_for(&self.base_url, &pass_id),
            pass_id,
        })
    }
}
