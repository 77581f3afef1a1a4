//! Human-submission token verification seam.

use async_trait::async_trait;

/// Gate that must pass before any RSVP write occurs.
///
/// Implementations never error: any failure to obtain a strict affirmative
/// from the verification authority (blank token, missing configuration,
/// transport failure, malformed response) is reported to the log sink and
/// collapses to `false`. The caller decides what `false` means.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> bool;
}
