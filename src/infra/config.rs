//! Centralized configuration (environment variables + defaults).

use crate::domain::model::EventDetails;

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Listen address for the HTTP server.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// Pre-shared reCAPTCHA secret. Optional here: the verifier treats a missing
/// secret as a verification failure rather than a startup error.
pub fn recaptcha_secret() -> Option<String> {
    std::env::var("RECAPTCHA_SECRET_KEY")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Verification authority endpoint (overridable for tests).
pub fn recaptcha_verify_url() -> String {
    std::env::var("RECAPTCHA_VERIFY_URL")
        .unwrap_or_else(|_| "https://www.google.com/recaptcha/api/siteverify".to_string())
}

/// Base URL of the passkit provider.
pub fn pass_api_base_url() -> String {
    std::env::var("PASS_API_BASE_URL").unwrap_or_else(|_| "https://api.passninja.com".to_string())
}

/// Fixed event metadata embedded into issued passes.
pub fn event_details() -> EventDetails {
    EventDetails {
        date: std::env::var("EVENT_DATE").unwrap_or_else(|_| "July 27, 2025".to_string()),
        time: std::env::var("EVENT_TIME").unwrap_or_else(|_| "12:00 PM".to_string()),
        location: std::env::var("EVENT_LOCATION").unwrap_or_else(|_| {
            "Bunbury Miami, 55 NE 14th St., Miami, FL 33132".to_string()
        }),
    }
}
