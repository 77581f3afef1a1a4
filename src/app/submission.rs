//! The RSVP submission workflow.
//!
//! Sequences verification, persistence, and conditional pass issuance into
//! one logical operation:
//!
//! 1. Verify the human-submission token. Failure rejects the whole
//!    submission before anything is written.
//! 2. Insert the RSVP with pass fields unset. A duplicate phone number is
//!    rejected by the store's uniqueness constraint, not by a pre-check, so
//!    concurrent duplicates race safely.
//! 3. `Yes`/`Maybe` responses get a wallet pass; `No` finishes here.
//! 4. Issue the pass, then attach its identifiers to the stored record.
//!    Issuance failure does NOT fail the submission: attendance was already
//!    captured, so the operation reports success with `wallet_pass = None`
//!    and the error goes to the log sink.

use crate::domain::model::{EventDetails, NewRsvp, PassReference, RsvpRecord};
use crate::domain::pass::{PassIssuer, PassPayload};
use crate::domain::verify::TokenVerifier;
use crate::storage::store::{ResponseStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The submission gate rejected the token; nothing was written.
    #[error("verification failed")]
    VerificationFailed,

    /// An RSVP already exists for this phone number; the existing record is
    /// untouched.
    #[error("an RSVP has already been submitted for this phone number")]
    DuplicateSubmission,

    /// Storage backend failure during the initial insert.
    #[error(transparent)]
    Store(StoreError),
}

/// Outcome of a successful submission: always the full record state plus a
/// nullable pass reference, never a partial shape.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    pub rsvp: RsvpRecord,
    pub wallet_pass: Option<PassReference>,
}

pub struct SubmissionService {
    store: Arc<dyn ResponseStore>,
    verifier: Arc<dyn TokenVerifier>,
    issuer: Arc<dyn PassIssuer>,
    event: EventDetails,
}

impl SubmissionService {
    pub fn new(
        store: Arc<dyn ResponseStore>,
        verifier: Arc<dyn TokenVerifier>,
        issuer: Arc<dyn PassIssuer>,
        event: EventDetails,
    ) -> Self {
        SubmissionService {
            store,
            verifier,
            issuer,
            event,
        }
    }

    pub async fn submit(
        &self,
        input: NewRsvp,
        token: &str,
    ) -> Result<SubmissionResult, SubmissionError> {
        // The single gate: must run before any write.
        if !self.verifier.verify(token).await {
            return Err(SubmissionError::VerificationFailed);
        }

        let mut record = self.store.insert(input).await.map_err(|e| match e {
            StoreError::ConstraintViolation => SubmissionError::DuplicateSubmission,
            other => SubmissionError::Store(other),
        })?;

        if !record.response.wants_pass() {
            return Ok(SubmissionResult {
                rsvp: record,
                wallet_pass: None,
            });
        }

        let payload = PassPayload {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            phone_number: record.phone_number.clone(),
            response: record.response,
            event: self.event.clone(),
        };

        let pass = match self.issuer.issue(record.device_class, &payload).await {
            Ok(p) => p,
            Err(e) => {
                // Partial failure: the RSVP stays persisted without a pass.
                // There is no automatic retry; a later resubmission is
                // rejected at the uniqueness check.
                tracing::warn!(
                    phone_number = %record.phone_number,
                    error = %e,
                    "pass issuance failed; RSVP kept without a pass"
                );
                return Ok(SubmissionResult {
                    rsvp: record,
                    wallet_pass: None,
                });
            }
        };

        match self
            .store
            .attach_pass(record.id, &pass.pass_id, &pass.pass_url)
            .await
        {
            Ok(()) => {
                record.pass_id = Some(pass.pass_id.clone());
                record.pass_url = Some(pass.pass_url.clone());
                Ok(SubmissionResult {
                    rsvp: record,
                    wallet_pass: Some(pass),
                })
            }
            Err(e) => {
                // Invariant violation: the record was just inserted, so it
                // cannot have vanished. Log it and still report success; the
                // record write already happened. The result carries no pass
                // so it matches what is actually stored.
                tracing::error!(
                    id = record.id,
                    error = %e,
                    "failed to attach pass identifiers to stored RSVP"
                );
                Ok(SubmissionResult {
                    rsvp: record,
                    wallet_pass: None,
                })
            }
        }
    }
}
