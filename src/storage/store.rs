//! Persistence seam over the RSVP collection.

use crate::domain::model::{NewRsvp, RsvpRecord};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The phone number already has an RSVP. Uniqueness is enforced here,
    /// in the store, so concurrent duplicate submissions race safely:
    /// exactly one insert wins, every loser sees this variant.
    #[error("an RSVP already exists for this phone number")]
    ConstraintViolation,

    /// The targeted record does not exist.
    #[error("RSVP record not found")]
    NotFound,

    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// The only shared mutable resource in the system. All mutation goes through
/// `insert` and `attach_pass`; nothing else writes to the collection.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Persists a new RSVP, assigning `id` and `created_at`. Fails with
    /// [`StoreError::ConstraintViolation`] when the phone number is taken.
    async fn insert(&self, rsvp: NewRsvp) -> Result<RsvpRecord, StoreError>;

    /// Attaches pass identifiers to an existing record. Idempotent at the
    /// storage layer (a second call overwrites); fails with
    /// [`StoreError::NotFound`] if `id` does not exist.
    async fn attach_pass(
        &self,
        id: i64,
        pass_id: &str,
        pass_url: &str,
    ) -> Result<(), StoreError>;

    /// Looks a record up by its natural external key.
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<RsvpRecord>, StoreError>;

    /// All records, for the public roster projection.
    async fn list_all(&self) -> Result<Vec<RsvpRecord>, StoreError>;

    /// Backend reachability probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
