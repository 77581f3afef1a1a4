//! Postgres-backed [`ResponseStore`].
//!
//! Uniqueness on `phone_number` is a real unique index; duplicate inserts
//! surface as SQLSTATE 23505 and are mapped to `ConstraintViolation` so the
//! database stays the serialization point for concurrent submissions.

use crate::domain::model::{DeviceClass, NewRsvp, RsvpRecord, RsvpResponse};
use crate::infra::config;
use crate::storage::store::{ResponseStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresRsvpStore {
    pool: PgPool,
}

impl PostgresRsvpStore {
    pub async fn new() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config::database_url())
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> anyhow::Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS rsvps (
                id BIGSERIAL PRIMARY KEY,
                phone_number TEXT NOT NULL UNIQUE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                response TEXT NOT NULL,
                comment TEXT,
                device_class TEXT NOT NULL,
                pass_id TEXT,
                pass_url TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

fn row_to_record(row: &PgRow) -> Result<RsvpRecord, StoreError> {
    let response_str: String = row.try_get("response").map_err(backend)?;
    let response = RsvpResponse::parse(&response_str)
        .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("unknown response value: {}", response_str)))?;

    let device_str: String = row.try_get("device_class").map_err(backend)?;
    let device_class = DeviceClass::parse(&device_str)
        .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("unknown device class: {}", device_str)))?;

    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(backend)?;

    Ok(RsvpRecord {
        id: row.try_get("id").map_err(backend)?,
        phone_number: row.try_get("phone_number").map_err(backend)?,
        first_name: row.try_get("first_name").map_err(backend)?,
        last_name: row.try_get("last_name").map_err(backend)?,
        response,
        comment: row.try_get("comment").map_err(backend)?,
        device_class,
        pass_id: row.try_get("pass_id").map_err(backend)?,
        pass_url: row.try_get("pass_url").map_err(backend)?,
        created_at,
    })
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.into())
}

fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::ConstraintViolation;
        }
    }
    backend(e)
}

#[async_trait]
impl ResponseStore for PostgresRsvpStore {
    async fn insert(&self, rsvp: NewRsvp) -> Result<RsvpRecord, StoreError> {
        let row = sqlx::query(
            "INSERT INTO rsvps (phone_number, first_name, last_name, response, comment, device_class)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, phone_number, first_name, last_name, response, comment, device_class,
                       pass_id, pass_url, created_at",
        )
        .bind(&rsvp.phone_number)
        .bind(&rsvp.first_name)
        .bind(&rsvp.last_name)
        .bind(rsvp.response.as_str())
        .bind(&rsvp.comment)
        .bind(rsvp.device_class.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        row_to_record(&row)
    }

    async fn attach_pass(
        &self,
        id: i64,
        pass_id: &str,
        pass_url: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE rsvps SET pass_id = $2, pass_url = $3 WHERE id = $1")
            .bind(id)
            .bind(pass_id)
            .bind(pass_url)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<RsvpRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, phone_number, first_name, last_name, response, comment, device_class,
                    pass_id, pass_url, created_at
             FROM rsvps WHERE phone_number = $1",
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn list_all(&self) -> Result<Vec<RsvpRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, phone_number, first_name, last_name, response, comment, device_class,
                    pass_id, pass_url, created_at
             FROM rsvps ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter().map(row_to_record).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
