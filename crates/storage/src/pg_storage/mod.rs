//! PostgreSQL storage backend using sqlx.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod locations;

use chrono::{DateTime, Utc};
use spott_core::{
    Location, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::StorageError;

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect to `database_url`. Schema creation is left to [`Self::migrate`].
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

    /// Create the `locations` table and every dependent table if missing.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        run_pg_migrations(&self.pool).await.map_err(|e| StorageError::Migration(e.to_string()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) const LOCATION_COLUMNS: &str = "id, name, address, latitude::float8 AS latitude,
     longitude::float8 AS longitude, created_at, google_place_id";

/// Rows missing a coordinate decode as NaN, which never matches in detection.
/// A missing name decodes as empty.
pub(crate) fn row_to_location(row: &sqlx::postgres::PgRow) -> Result<Location, StorageError> {
    let id: Uuid = row.try_get("id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let latitude: Option<f64> = row.try_get("latitude")?;
    let longitude: Option<f64> = row.try_get("longitude")?;
    let name: Option<String> = row.try_get("name")?;
    if latitude.is_none() || longitude.is_none() {
        tracing::warn!(%id, "location without coordinates, excluded from matching");
    }
    Ok(Location {
        id,
        name: name.unwrap_or_default(),
        address: row.try_get("address")?,
        latitude: latitude.unwrap_or(f64::NAN),
        longitude: longitude.unwrap_or(f64::NAN),
        created_at,
        google_place_id: row.try_get("google_place_id")?,
    })
}
