//! In-memory [`ResponseStore`] with the same contract as the Postgres store.
//!
//! Used by the integration tests; also handy for local development without a
//! database.

use crate::domain::model::{NewRsvp, RsvpRecord};
use crate::storage::store::{ResponseStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryRsvpStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    records: Vec<RsvpRecord>,
}

impl InMemoryRsvpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseStore for InMemoryRsvpStore {
    async fn insert(&self, rsvp: NewRsvp) -> Result<RsvpRecord, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner
            .records
            .iter()
            .any(|r| r.phone_number == rsvp.phone_number)
        {
            return Err(StoreError::ConstraintViolation);
        }
        inner.next_id += 1;
        let record = RsvpRecord {
            id: inner.next_id,
            phone_number: rsvp.phone_number,
            first_name: rsvp.first_name,
            last_name: rsvp.last_name,
            response: rsvp.response,
            comment: rsvp.comment,
            device_class: rsvp.device_class,
            pass_id: None,
            pass_url: None,
            created_at: Utc::now(),
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn attach_pass(
        &self,
        id: i64,
        pass_id: &str,
        pass_url: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        record.pass_id = Some(pass_id.to_string());
        record.pass_url = Some(pass_url.to_string());
        Ok(())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<RsvpRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .records
            .iter()
            .find(|r| r.phone_number == phone_number)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<RsvpRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DeviceClass, RsvpResponse};

    fn new_rsvp(phone: &str) -> NewRsvp {
        NewRsvp {
            phone_number: phone.to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            response: RsvpResponse::Yes,
            comment: None,
            device_class: DeviceClass::IPhone,
        }
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_rejects_duplicates() {
        let store = InMemoryRsvpStore::new();
        let first = store.insert(new_rsvp("5551234567")).await.unwrap();
        assert_eq!(first.id, 1);
        assert!(first.pass_id.is_none() && first.pass_url.is_none());

        let err = store.insert(new_rsvp("5551234567")).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation));

        let second = store.insert(new_rsvp("5559876543")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn attach_pass_overwrites_and_requires_existing_record() {
        let store = InMemoryRsvpStore::new();
        let record = store.insert(new_rsvp("5551234567")).await.unwrap();

        store
            .attach_pass(record.id, "pass_a", "https://example.com/a")
            .await
            .unwrap();
        // Second call overwrites (idempotent at the storage layer).
        store
            .attach_pass(record.id, "pass_b", "https://example.com/b")
            .await
            .unwrap();

        let stored = store
            .find_by_phone("5551234567")
            .await
            .unwrap()
            .expect("record exists");
        assert_eq!(stored.pass_id.as_deref(), Some("pass_b"));
        assert_eq!(stored.pass_url.as_deref(), Some("https://example.com/b"));

        let err = store
            .attach_pass(9999, "pass_x", "https://example.com/x")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn find_by_phone_misses_cleanly() {
        let store = InMemoryRsvpStore::new();
        assert!(store.find_by_phone("0000000000").await.unwrap().is_none());
    }
}
