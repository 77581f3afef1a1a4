//! Network-backed [`TokenVerifier`] targeting the reCAPTCHA `siteverify`
//! endpoint.
//!
//! Single attempt, no retry. Every failure path collapses to `false` after
//! being logged; this verifier never interrupts caller control flow.

use crate::domain::verify::TokenVerifier;
use crate::infra::config;
use async_trait::async_trait;
use serde::Deserialize;

pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: Option<String>,
    verify_url: String,
}

/// Only a strict-boolean `success` counts; a truthy string fails to
/// deserialize and is treated as a malformed response.
#[derive(Deserialize)]
struct SiteVerifyResponse {
    success: bool,
}

impl RecaptchaVerifier {
    pub fn from_env() -> Self {
        Self::new(config::recaptcha_secret(), config::recaptcha_verify_url())
    }

    pub fn new(secret: Option<String>, verify_url: String) -> Self {
        RecaptchaVerifier {
            client: reqwest::Client::new(),
            secret,
            verify_url,
        }
    }
}

#[async_trait]
impl TokenVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> bool {
        if token.trim().is_empty() {
            tracing::warn!("verification token is empty or missing");
            return false;
        }

        let secret = match self.secret.as_deref() {
            Some(s) => s,
            None => {
                tracing::error!("reCAPTCHA secret key not configured");
                return false;
            }
        };

        let response = match self
            .client
            .post(&self.verify_url)
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "verification request failed");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "verification authority returned non-success status");
            return false;
        }

        match response.json::<SiteVerifyResponse>().await {
            Ok(body) => body.success,
            Err(e) => {
                tracing::warn!(error = %e, "malformed verification response body");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;

    /// Serves a fixed response in place of the verification authority.
    async fn spawn_authority(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/siteverify", post(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/siteverify", addr)
    }

    fn verifier(secret: Option<&str>, url: String) -> RecaptchaVerifier {
        RecaptchaVerifier::new(secret.map(str::to_string), url)
    }

    #[tokio::test]
    async fn blank_token_fails_without_a_request() {
        // The URL is never contacted for a blank token.
        let v = verifier(Some("secret"), "http://127.0.0.1:1/siteverify".to_string());
        assert!(!v.verify("").await);
        assert!(!v.verify("   ").await);
    }

    #[tokio::test]
    async fn missing_secret_fails_without_a_request() {
        let v = verifier(None, "http://127.0.0.1:1/siteverify".to_string());
        assert!(!v.verify("some-token").await);
    }

    #[tokio::test]
    async fn strict_boolean_success_is_required() {
        let url = spawn_authority(StatusCode::OK, r#"{"success": true}"#).await;
        assert!(verifier(Some("secret"), url).verify("tok").await);

        // A truthy string is a malformed response, not an affirmative.
        let url = spawn_authority(StatusCode::OK, r#"{"success": "true"}"#).await;
        assert!(!verifier(Some("secret"), url).verify("tok").await);

        let url = spawn_authority(StatusCode::OK, r#"{"success": false}"#).await;
        assert!(!verifier(Some("secret"), url).verify("tok").await);

        let url = spawn_authority(StatusCode::OK, r#"{"hostname": "x"}"#).await;
        assert!(!verifier(Some("secret"), url).verify("tok").await);
    }

    #[tokio::test]
    async fn non_success_status_fails() {
        let url = spawn_authority(StatusCode::BAD_GATEWAY, r#"{"success": true}"#).await;
        assert!(!verifier(Some("secret"), url).verify("tok").await);
    }

    #[tokio::test]
    async fn transport_failure_fails() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/siteverify", listener.local_addr().unwrap());
        drop(listener);

        assert!(!verifier(Some("secret"), url).verify("tok").await);
    }
}
